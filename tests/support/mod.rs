pub mod detailform_env;
pub mod stub_server;
