//! Outbound transactional email.
//!
//! - [`Mailer`] -- the seam the auth service sends through.
//! - [`SmtpMailer`] -- `lettre` SMTP delivery, configured by [`EmailConfig`].
//! - [`DisabledMailer`] -- installed when SMTP is not configured; every send fails.
//! - [`templates`] -- subject and HTML body builders.

pub mod smtp;
pub mod templates;

use async_trait::async_trait;

pub use smtp::{EmailConfig, SmtpMailer};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// No SMTP server is configured for this process.
    #[error("Email service not configured")]
    NotConfigured,

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends a single HTML email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}

/// Mailer used when no SMTP host is configured.
///
/// Every send fails with [`MailError::NotConfigured`] so callers surface a
/// server error instead of silently dropping mail.
#[derive(Debug, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, to: &str, _subject: &str, _html_body: &str) -> Result<(), MailError> {
        tracing::error!(to, "Email requested but no SMTP server is configured");
        Err(MailError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_mailer_always_fails() {
        let result = DisabledMailer.send("a@x.com", "subject", "<p>body</p>").await;
        assert!(matches!(result, Err(MailError::NotConfigured)));
    }

    #[test]
    fn mail_error_display_build() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn mail_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
