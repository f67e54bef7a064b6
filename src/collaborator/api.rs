//! Wire types and the blocking POST used for form submissions.

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::config::{ConfigError, EndpointSettings};
use crate::form::SubmissionPayload;
use crate::http_client;

const MAX_RESPONSE_BYTES: usize = 256 * 1024;

/// Fields computed by the collaborator for a successful submission.
///
/// Absent keys and explicit `null`s both deserialize to blank values so
/// partial bodies still render.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResponseData {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roll_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub numbers: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub alphabets: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub highest_lowercase_alphabet: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_prime_found: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub file_valid: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub file_mime_type: String,
    pub file_size_kb: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Non-2xx status. The body is logged, never shown.
    #[error("Failed to submit form")]
    Rejected { status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
    /// The worker stopped before a response was delivered.
    #[error("Submission was interrupted before a response arrived")]
    Interrupted,
}

/// Posts payloads to one configured endpoint.
#[derive(Clone)]
pub struct CollaboratorClient {
    agent: ureq::Agent,
    endpoint: Url,
}

impl CollaboratorClient {
    pub fn new(settings: &EndpointSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::build_agent(settings.timeouts()),
            endpoint: settings.parsed_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one payload and decode the computed fields.
    pub fn submit(&self, payload: &SubmissionPayload) -> Result<ResponseData, SubmitError> {
        let request = self
            .agent
            .post(self.endpoint.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let response = match request.send_json(payload) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                log_error_body(status, response);
                return Err(SubmitError::Rejected { status });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(SubmitError::Transport(err.to_string()));
            }
        };

        let body = http_client::read_response_text(response, MAX_RESPONSE_BYTES)
            .map_err(|err| SubmitError::InvalidBody(err.to_string()))?;
        parse_response_data(&body)
    }
}

fn parse_response_data(body: &str) -> Result<ResponseData, SubmitError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(SubmitError::InvalidBody("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| SubmitError::InvalidBody(err.to_string()))
}

fn log_error_body(status: u16, response: ureq::Response) {
    match http_client::read_response_text(response, MAX_RESPONSE_BYTES) {
        Ok(body) => match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => tracing::warn!(status, body = %json, "Collaborator rejected submission"),
            Err(err) => tracing::warn!(
                status,
                body = %body.trim(),
                "Collaborator rejected submission with a non-JSON body: {err}"
            ),
        },
        Err(err) => tracing::warn!(status, "Collaborator rejected submission; body unreadable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;

    const SAMPLE_BODY: &str = r#"{
        "user_id": "u1", "email": "e@x.com", "roll_number": "R1",
        "numbers": [1, 2], "alphabets": ["A"], "highest_lowercase_alphabet": ["a"],
        "is_prime_found": true, "file_valid": true,
        "file_mime_type": "text/plain", "file_size_kb": 10
    }"#;

    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = stream.read(&mut buf).unwrap_or(0);
            if read == 0 {
                break;
            }
            data.extend_from_slice(&buf[..read]);
            let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&data[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                break;
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = tx.send(read_request(&mut stream));
                let _ = stream.write_all(response.as_bytes());
            }
        });
        (format!("http://{addr}/post/"), rx)
    }

    fn client(url: String) -> CollaboratorClient {
        CollaboratorClient::new(&EndpointSettings {
            url,
            ..EndpointSettings::default()
        })
        .unwrap()
    }

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            full_name: "Ada".into(),
            dob: "10/12/1815".into(),
            college_email: "ada@college.edu".into(),
            roll_number: "R1".into(),
            numbers: vec![1, 2, 3],
            alphabets: vec!["A".into(), "B".into()],
        }
    }

    #[test]
    fn parses_full_response() {
        let data = parse_response_data(SAMPLE_BODY).unwrap();
        assert_eq!(data.user_id, "u1");
        assert_eq!(data.numbers, vec![1, 2]);
        assert_eq!(data.highest_lowercase_alphabet, vec!["a"]);
        assert!(data.is_prime_found);
        assert_eq!(data.file_size_kb, Some(10.0));
    }

    #[test]
    fn missing_fields_default_to_blank() {
        let data = parse_response_data(r#"{ "user_id": "u2" }"#).unwrap();
        assert_eq!(data.user_id, "u2");
        assert!(data.email.is_empty());
        assert!(data.numbers.is_empty());
        assert!(!data.file_valid);
        assert_eq!(data.file_size_kb, None);
    }

    #[test]
    fn null_fields_render_blank() {
        let data = parse_response_data(
            r#"{
                "user_id": "u3", "email": null, "roll_number": "R3",
                "numbers": null, "alphabets": ["B"], "highest_lowercase_alphabet": null,
                "is_prime_found": null, "file_valid": false,
                "file_mime_type": null, "file_size_kb": null
            }"#,
        )
        .unwrap();
        assert_eq!(data.user_id, "u3");
        assert!(data.email.is_empty());
        assert!(data.numbers.is_empty());
        assert_eq!(data.alphabets, vec!["B"]);
        assert!(data.highest_lowercase_alphabet.is_empty());
        assert!(!data.is_prime_found);
        assert!(data.file_mime_type.is_empty());
        assert_eq!(data.file_size_kb, None);
    }

    #[test]
    fn rejects_empty_and_malformed_bodies() {
        assert!(matches!(
            parse_response_data("  "),
            Err(SubmitError::InvalidBody(_))
        ));
        assert!(matches!(
            parse_response_data("<html>oops</html>"),
            Err(SubmitError::InvalidBody(_))
        ));
    }

    #[test]
    fn posts_json_body_with_content_type() {
        let (url, requests) = serve_once("200 OK", SAMPLE_BODY);
        let data = client(url).submit(&payload()).unwrap();
        assert_eq!(data.roll_number, "R1");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /post/ HTTP/1.1"));
        assert!(
            request
                .to_ascii_lowercase()
                .contains("content-type: application/json")
        );
        let body = request.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["numbers"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["alphabets"], serde_json::json!(["A", "B"]));
        assert_eq!(json["fullName"], "Ada");
    }

    #[test]
    fn non_success_status_is_generic_failure() {
        let (url, _requests) = serve_once("400 Bad Request", r#"{ "error": "bad numbers" }"#);
        let err = client(url).submit(&payload()).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 400 }));
        assert_eq!(err.to_string(), "Failed to submit form");
    }

    #[test]
    fn unparseable_success_body_fails() {
        let (url, _requests) = serve_once("200 OK", "not json");
        let err = client(url).submit(&payload()).unwrap_err();
        assert!(matches!(err, SubmitError::InvalidBody(_)));
    }

    #[test]
    fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client(format!("http://{addr}/post/"))
            .submit(&payload())
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
