pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod email_request;
pub mod errors;
pub mod telemetry;
