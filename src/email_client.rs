use std::fmt::{Debug, Formatter};
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use crate::configuration::{ConfigurationError, EmailClientSettings};
use crate::domain::{SenderEmail, SenderName};
use crate::email_request::{SendEmailRequest, SenderRequest, ToEmailRequest};
use crate::errors::error_chain_fmt;

/// Brevo answers with one of these when it has accepted the message for delivery.
pub const ACCEPTED_STATUS_CODES: [u16; 3] = [200, 201, 202];

const SEND_EMAIL_PATH: &str = "/v3/smtp/email";

#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Failed to send email: {status}, {body}")]
    Delivery { status: u16, body: String },
    #[error("Failed to reach the email API")]
    Request(#[source] reqwest::Error),
}

impl Debug for SendEmailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Client for Brevo's transactional email API.
///
/// Holds no mutable state, so a single instance (or its clones, which share
/// the underlying connection pool) can serve concurrent sends.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: SenderEmail,
    sender_name: SenderName,
    api_key: Secret<String>,
    timeout: Option<Duration>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SenderEmail,
        sender_name: SenderName,
        api_key: Secret<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
            sender,
            sender_name,
            api_key,
            timeout,
        }
    }

    /// Send a single HTML email to `recipient`.
    ///
    /// Fires exactly one request and never retries; retry policy belongs to
    /// the caller. The recipient address is passed through unvalidated.
    #[tracing::instrument(
        name = "Sending email via Brevo",
        skip_all,
        fields(request_id = %Uuid::new_v4(), recipient = %recipient)
    )]
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        html_content: &str,
    ) -> Result<(), SendEmailError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), SEND_EMAIL_PATH);

        let request_body = SendEmailRequest {
            sender: SenderRequest::new(self.sender_name.as_ref(), self.sender.as_ref()),
            to: vec![ToEmailRequest::new(recipient)],
            subject,
            html_content,
        };

        let mut builder = self
            .http_client
            .post(&url)
            .header("accept", "application/json")
            .header("api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&request_body);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Email API request failed");
            SendEmailError::Request(e)
        })?;

        let status = response.status().as_u16();
        tracing::info!(status, "Email API Response: {}", status);

        if !ACCEPTED_STATUS_CODES.contains(&status) {
            // The body is only diagnostic, an unreadable one is reported as empty
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status, %body, "Email API rejected the message");
            return Err(SendEmailError::Delivery { status, body });
        }

        Ok(())
    }
}

/// Build a client from `settings` and send one email with it.
///
/// A missing credential fails with [`SendEmailError::Configuration`] before
/// any request is made.
pub async fn send_email(
    settings: &EmailClientSettings,
    to_email: &str,
    subject: &str,
    html_content: &str,
) -> Result<(), SendEmailError> {
    let email_client = settings.client()?;
    email_client.send_email(to_email, subject, html_content).await
}
