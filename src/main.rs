use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use brevo_mailer::configuration::get_configuration;
use brevo_mailer::telemetry::{get_subscriber, init_subscriber};

/// Send one transactional email through the Brevo API.
///
/// Credentials come from BREVO_API_KEY and EMAIL_USER.
#[derive(Parser)]
#[command(name = "brevo-mailer")]
struct Cli {
    /// Recipient address
    #[arg(long)]
    to: String,

    #[arg(long)]
    subject: String,

    /// HTML body given inline
    #[arg(long, conflicts_with = "html_file", required_unless_present = "html_file")]
    html: Option<String>,

    /// Read the HTML body from a file
    #[arg(long, value_name = "PATH")]
    html_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("brevo_mailer".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let cli = Cli::parse();

    let html_content = match (cli.html, cli.html_file) {
        (Some(html), _) => html,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read HTML body from {}", path.display()))?,
        (None, None) => anyhow::bail!("Either --html or --html-file is required"),
    };

    let configuration = get_configuration().context("Failed to read configuration")?;
    let email_client = configuration
        .client()
        .context("Failed to build the email client")?;

    email_client
        .send_email(&cli.to, &cli.subject, &html_content)
        .await
        .context("Failed to send email")?;

    Ok(())
}
