use brevo_mailer::configuration::{ConfigurationError, EmailClientSettings};
use brevo_mailer::email_client::{send_email, SendEmailError};
use claim::assert_ok;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{spawn_app, TEST_API_KEY, TEST_SENDER};

#[tokio::test]
async fn test_send_email_posts_one_message_to_brevo() {
    let app = spawn_app().await;

    Mock::given(path("/v3/smtp/email"))
        .and(method("POST"))
        .and(header("api-key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let outcome = send_email(
        &app.settings,
        "guest@example.com",
        "Your booking is confirmed",
        "<h1>See you on Friday</h1>",
    )
    .await;

    assert_ok!(outcome);
}

#[tokio::test]
async fn test_request_body_has_a_single_recipient_and_the_configured_sender() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&app.email_server)
        .await;

    send_email(
        &app.settings,
        "guest@example.com",
        "Your booking is confirmed",
        "<h1>See you on Friday</h1>",
    )
    .await
    .unwrap();

    let bodies = app.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        serde_json::json!({
            "sender": { "name": "Venuo", "email": TEST_SENDER },
            "to": [{ "email": "guest@example.com" }],
            "subject": "Your booking is confirmed",
            "htmlContent": "<h1>See you on Friday</h1>",
        })
    );
}

#[tokio::test]
async fn test_missing_credentials_fail_without_calling_brevo() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        // no request may reach the provider
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            EmailClientSettings {
                brevo_api_key: None,
                ..app.settings.clone()
            },
            "BREVO_API_KEY",
        ),
        (
            EmailClientSettings {
                email_user: None,
                ..app.settings.clone()
            },
            "EMAIL_USER",
        ),
    ];

    for (settings, missing) in test_cases {
        let outcome = send_email(&settings, "guest@example.com", "Subject", "<p>Body</p>").await;

        match outcome {
            Err(SendEmailError::Configuration(ConfigurationError::MissingCredential(var))) => {
                assert_eq!(var, missing)
            }
            other => panic!("Expected a configuration error for {}, got {:?}", missing, other),
        }
    }
}

#[tokio::test]
async fn test_rejected_message_reports_status_and_body() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"code":"invalid_parameter","message":"email is not valid"}"#),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let error = send_email(&app.settings, "not-an-address", "Subject", "<p>Body</p>")
        .await
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        r#"Failed to send email: 400, {"code":"invalid_parameter","message":"email is not valid"}"#
    );
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let outcome = app
        .email_client()
        .send_email("guest@example.com", "Subject", "<p>Body</p>")
        .await;

    assert!(matches!(
        outcome,
        Err(SendEmailError::Delivery { status: 500, .. })
    ));
}
