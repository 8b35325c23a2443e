//! Request body of Brevo's transactional email endpoint (`POST /v3/smtp/email`).

#[derive(serde::Serialize)]
pub struct SenderRequest<'a> {
    name: &'a str,
    email: &'a str,
}

impl<'a> SenderRequest<'a> {
    pub fn new(name: &'a str, email: &'a str) -> Self {
        Self { name, email }
    }
}

#[derive(serde::Serialize)]
pub struct ToEmailRequest<'a> {
    email: &'a str,
}

impl<'a> ToEmailRequest<'a> {
    pub fn new(email: &'a str) -> Self {
        Self { email }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest<'a> {
    pub sender: SenderRequest<'a>,
    pub to: Vec<ToEmailRequest<'a>>,
    pub subject: &'a str,
    pub html_content: &'a str,
}
