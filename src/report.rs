use crate::clock::Clock;
use crate::config::{Config, EmailConfig};
use crate::data::DataStore;
use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("{0}")]
    Transport(String),
}

pub trait Mailer {
    /// Sends a single plain-text message with an empty body.
    fn send(&self, email: &EmailConfig, subject: &str) -> Result<(), MailError>;
}

/// STARTTLS submission with login, one connection per message.
pub struct SmtpMailer;

impl Mailer for SmtpMailer {
    fn send(&self, email: &EmailConfig, subject: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(email.from_email.parse()?)
            .to(email.to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(String::new())?;

        let transport = SmtpTransport::starttls_relay(&email.smtp_server)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(email.smtp_port)
            .credentials(Credentials::new(
                email.from_email.clone(),
                email.password.clone(),
            ))
            .build();

        transport
            .send(&message)
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MailOutcome {
    Disabled,
    Sent,
    Failed(String),
}

pub fn report_subject(day: NaiveDate, minutes: u64) -> String {
    format!("Break time {}: {minutes} minutes", day.format("%Y-%m-%d"))
}

/// Emails the total for `day`. Failures are printed and swallowed.
pub fn send_daily_email(
    config: &Config,
    mailer: &impl Mailer,
    day: NaiveDate,
    minutes: u64,
) -> MailOutcome {
    if !config.email.enabled {
        tracing::debug!("email reports disabled");
        return MailOutcome::Disabled;
    }

    match mailer.send(&config.email, &report_subject(day, minutes)) {
        Ok(()) => {
            println!("✉️  Daily report sent: {minutes} minutes");
            MailOutcome::Sent
        }
        Err(e) => {
            tracing::warn!(error = %e, server = %config.email.smtp_server, "daily report failed");
            println!("❌ Failed to send email: {e}");
            MailOutcome::Failed(e.to_string())
        }
    }
}

/// Sends yesterday's summary if the stored record is yesterday's and unsent.
///
/// The record is marked as sent whether or not delivery worked, so a failed
/// report is never retried.
pub fn check_and_send_yesterday_report(
    store: &impl DataStore,
    config: &Config,
    mailer: &impl Mailer,
    clock: &impl Clock,
) -> AppResult<Option<MailOutcome>> {
    let yesterday = clock.yesterday();
    let Some(mut record) = store.read()? else {
        return Ok(None);
    };
    if record.date != yesterday || record.report_sent {
        return Ok(None);
    }

    let outcome = send_daily_email(config, mailer, yesterday, record.total_minutes);
    record.report_sent = true;
    store.write(&record)?;
    Ok(Some(outcome))
}

/// Prints the email settings and, when `send` is set, mails a sample report.
pub fn email_self_test(
    config: &Config,
    mailer: &impl Mailer,
    clock: &impl Clock,
    send: bool,
) -> AppResult<()> {
    println!("🧪 Break Tracker Email Test");
    println!("{}", "=".repeat(40));
    println!("📧 Email enabled: {}", config.email.enabled);
    println!("📮 SMTP server: {}:{}", config.email.smtp_server, config.email.smtp_port);
    println!("📫 From email: {}", config.email.from_email);
    println!("📬 To email: {}", config.email.to_email);

    if !send {
        println!("\n💡 To send a real test report, run: brk test-email --send");
        return Ok(());
    }

    println!("\n🚀 Sending a real test report...");
    match send_daily_email(config, mailer, clock.yesterday(), 123) {
        MailOutcome::Sent => {
            println!("✅ Test report sent - check your inbox!");
            Ok(())
        }
        MailOutcome::Disabled => Err(AppError::Mail(
            "email is disabled; set enabled = true in the [email] section".to_string(),
        )),
        MailOutcome::Failed(message) => Err(AppError::Mail(message)),
    }
}
