use serde::Serialize;

use super::FormFields;

/// JSON body posted to the collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub dob: String,
    pub college_email: String,
    pub roll_number: String,
    pub numbers: Vec<i64>,
    pub alphabets: Vec<String>,
}

/// Reasons the list fields cannot be turned into a payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("Numbers and Alphabets arrays cannot be empty.")]
    EmptyLists,
    #[error("Numbers must be comma-separated integers (invalid: '{token}').")]
    InvalidNumber { token: String },
}

/// Split on commas and trim each piece, dropping pieces that end up empty.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|piece| !piece.is_empty())
}

/// Parse a comma-separated list of base-10 integers.
pub fn parse_numbers(raw: &str) -> Result<Vec<i64>, PayloadError> {
    split_list(raw)
        .map(|token| {
            token.parse::<i64>().map_err(|_| PayloadError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a comma-separated list of strings. Case and characters are kept as typed.
pub fn parse_alphabets(raw: &str) -> Vec<String> {
    split_list(raw).map(str::to_string).collect()
}

/// Build the request body from validated fields.
///
/// Fails when either list parses to nothing or a number token is malformed.
pub fn build_payload(fields: &FormFields) -> Result<SubmissionPayload, PayloadError> {
    let numbers = parse_numbers(&fields.numbers)?;
    let alphabets = parse_alphabets(&fields.alphabets);
    if numbers.is_empty() || alphabets.is_empty() {
        return Err(PayloadError::EmptyLists);
    }
    Ok(SubmissionPayload {
        full_name: fields.full_name.clone(),
        dob: fields.dob.clone(),
        college_email: fields.college_email.clone(),
        roll_number: fields.roll_number.clone(),
        numbers,
        alphabets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(numbers: &str, alphabets: &str) -> FormFields {
        FormFields {
            full_name: "Ada".into(),
            dob: "10/12/1815".into(),
            college_email: "ada@college.edu".into(),
            roll_number: "R1".into(),
            numbers: numbers.into(),
            alphabets: alphabets.into(),
        }
    }

    #[test]
    fn parses_spaced_lists() {
        let payload = build_payload(&fields("1, 2, 3", "A, B, C")).unwrap();
        assert_eq!(payload.numbers, vec![1, 2, 3]);
        assert_eq!(payload.alphabets, vec!["A", "B", "C"]);
    }

    #[test]
    fn keeps_order_sign_and_case() {
        let payload = build_payload(&fields("10,-4, +7 ,0", "z,B , c")).unwrap();
        assert_eq!(payload.numbers, vec![10, -4, 7, 0]);
        assert_eq!(payload.alphabets, vec!["z", "B", "c"]);
    }

    #[test]
    fn empty_numbers_abort_with_banner_message() {
        let err = build_payload(&fields("", "A")).unwrap_err();
        assert_eq!(err, PayloadError::EmptyLists);
        assert_eq!(
            err.to_string(),
            "Numbers and Alphabets arrays cannot be empty."
        );
    }

    #[test]
    fn separators_only_count_as_empty() {
        assert_eq!(
            build_payload(&fields(" , ,", "A")).unwrap_err(),
            PayloadError::EmptyLists
        );
        assert_eq!(
            build_payload(&fields("1", "  ")).unwrap_err(),
            PayloadError::EmptyLists
        );
    }

    #[test]
    fn skips_blank_pieces_between_commas() {
        assert_eq!(parse_numbers("1,,2, ").unwrap(), vec![1, 2]);
        assert_eq!(parse_alphabets("a,, b"), vec!["a", "b"]);
    }

    #[test]
    fn malformed_number_is_reported() {
        let err = build_payload(&fields("1, two, 3", "A")).unwrap_err();
        assert_eq!(
            err,
            PayloadError::InvalidNumber {
                token: "two".to_string()
            }
        );
        assert!(err.to_string().contains("'two'"));
        assert!(parse_numbers("1.5").is_err());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let payload = build_payload(&fields("1, 2", "A")).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fullName": "Ada",
                "dob": "10/12/1815",
                "collegeEmail": "ada@college.edu",
                "rollNumber": "R1",
                "numbers": [1, 2],
                "alphabets": ["A"],
            })
        );
    }
}
