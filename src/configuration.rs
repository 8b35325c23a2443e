use std::fmt::{Debug, Formatter};
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};

use crate::domain::{SenderEmail, SenderName};
use crate::email_client::EmailClient;
use crate::errors::error_chain_fmt;

pub const API_KEY_VAR: &str = "BREVO_API_KEY";
pub const SENDER_EMAIL_VAR: &str = "EMAIL_USER";

pub const DEFAULT_BASE_URL: &str = "https://api.brevo.com";
pub const DEFAULT_SENDER_NAME: &str = "Venuo";

/// Everything the email client needs to talk to Brevo.
///
/// Field names match the lowercased environment variables, so `BREVO_API_KEY`
/// lands in `brevo_api_key` and `EMAIL_USER` in `email_user`. Both credentials
/// are optional at this level: a missing one only becomes an error when a
/// client is built from the settings.
///
/// The API key is wrapped in [`Secret`] so it is redacted from `Debug` output
/// and wiped from memory on drop. Use [`ExposeSecret::expose_secret`] to read it.
#[derive(serde::Deserialize, Clone, Default)]
pub struct EmailClientSettings {
    pub brevo_api_key: Option<Secret<String>>,
    pub email_user: Option<String>,
    pub email_sender_name: Option<String>,
    pub brevo_base_url: Option<String>,
    #[serde(default)]
    pub email_timeout_milliseconds: Option<u64>,
}

#[derive(thiserror::Error)]
pub enum ConfigurationError {
    #[error("{0} is not configured")]
    MissingCredential(&'static str),
    /// `EMAIL_USER` is present but not a well-formed address once trimmed.
    /// Brevo would reject it as an unverified sender anyway.
    #[error("{0}")]
    InvalidSender(String),
    #[error("{0}")]
    InvalidSenderName(String),
    #[error("Failed to load configuration")]
    Load(#[from] config::ConfigError),
}

impl Debug for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl EmailClientSettings {
    pub fn api_key(&self) -> Result<Secret<String>, ConfigurationError> {
        match &self.brevo_api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(key.clone()),
            _ => Err(ConfigurationError::MissingCredential(API_KEY_VAR)),
        }
    }

    pub fn sender(&self) -> Result<SenderEmail, ConfigurationError> {
        let email = self
            .email_user
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(ConfigurationError::MissingCredential(SENDER_EMAIL_VAR))?;

        SenderEmail::parse(email.to_owned()).map_err(ConfigurationError::InvalidSender)
    }

    pub fn sender_name(&self) -> Result<SenderName, ConfigurationError> {
        let name = self
            .email_sender_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_owned());

        SenderName::parse(name).map_err(ConfigurationError::InvalidSenderName)
    }

    pub fn base_url(&self) -> String {
        self.brevo_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
    }

    /// `None` leaves the HTTP client's own default in place.
    pub fn timeout(&self) -> Option<Duration> {
        self.email_timeout_milliseconds.map(Duration::from_millis)
    }

    /// Build a client, failing before any network traffic if a credential
    /// is missing. The API key is checked before the sender address.
    pub fn client(&self) -> Result<EmailClient, ConfigurationError> {
        let api_key = self.api_key()?;
        let sender = self.sender()?;
        let sender_name = self.sender_name()?;

        Ok(EmailClient::new(
            self.base_url(),
            sender,
            sender_name,
            api_key,
            self.timeout(),
        ))
    }
}

pub fn get_configuration() -> Result<EmailClientSettings, ConfigurationError> {
    let mut settings = config::Config::default();

    // An optional top level file named `configuration` in any format
    // `config` knows how to parse: yaml, json, toml, etc.
    settings.merge(config::File::with_name("configuration").required(false))?;

    // Environment variables take precedence over the file
    settings.merge(config::Environment::new())?;

    Ok(settings.try_into()?)
}
