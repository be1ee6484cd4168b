//! Outbound email notifications.
//!
//! When SMTP credentials are configured, messages go out through lettre's
//! async transport; otherwise the log-only notifier records the full message
//! locally. Either way the caller treats delivery as fire-and-forget.

pub mod templates;

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("SMTP delivery failed: {0}")]
    Smtp(String),

    #[error("template rendering failed: {0}")]
    Template(String),

    #[error("notifier configuration error: {0}")]
    Config(String),
}

/// A rendered notification ready for delivery.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
    /// Category tag recorded in the notification log (e.g. `application_status`).
    pub kind: String,
}

/// Trait for notification channel implementations.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g. "smtp", "log").
    fn channel_name(&self) -> &str;
}

/// Sends notifications as emails via SMTP.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    /// Build an `EmailNotifier` from SMTP configuration. Fails when
    /// credentials are absent or the sender address does not parse.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let (username, password) = match (&config.username, &config.password) {
            (Some(username), Some(password)) => (username.clone(), password.clone()),
            _ => {
                return Err(NotifyError::Config(
                    "SMTP credentials are not configured".to_string(),
                ))
            }
        };

        let from: Mailbox = config
            .sender()
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Config(e.to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifyError::Config(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Config(e.to_string()))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject);

        let message = match &email.html_body {
            Some(html) => builder
                .multipart(MultiPart::alternative_plain_html(
                    email.text_body.clone(),
                    html.clone(),
                ))
                .map_err(|e| NotifyError::Smtp(e.to_string()))?,
            None => builder
                .body(email.text_body.clone())
                .map_err(|e| NotifyError::Smtp(e.to_string()))?,
        };

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;

        tracing::info!(
            channel = "smtp",
            to = %email.to,
            subject = %email.subject,
            "notification delivered"
        );

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "smtp"
    }
}

/// Log-only notifier used when SMTP is unconfigured.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        tracing::info!(
            channel = "log",
            to = %email.to,
            subject = %email.subject,
            kind = %email.kind,
            body = %email.text_body,
            "notification logged (SMTP not configured)"
        );
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "log"
    }
}
