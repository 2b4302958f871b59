//! Email notification service for new inquiries.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Delivery
//! is best-effort: callers dispatch [`EmailService::notify_new_inquiry`] on
//! a detached task and never block a response on it.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use amberleaf_core::Inquiry;

use crate::config::EmailConfig;

/// HTML template for the new-inquiry notification.
#[derive(Template)]
#[template(path = "email/inquiry_notification.html")]
struct InquiryNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    product: &'a str,
    message: &'a str,
    date: &'a str,
}

/// Plain text template for the new-inquiry notification.
#[derive(Template)]
#[template(path = "email/inquiry_notification.txt")]
struct InquiryNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    product: &'a str,
    message: &'a str,
    date: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for inquiry notifications.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    notify_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig, notify_address: &str) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            notify_address: notify_address.to_owned(),
        })
    }

    /// Send the new-inquiry notification to the configured admin address.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn notify_new_inquiry(&self, inquiry: &Inquiry) -> Result<(), EmailError> {
        let date = inquiry.date.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let phone = inquiry.phone.as_deref().unwrap_or("-");

        let html = InquiryNotificationHtml {
            name: &inquiry.name,
            email: inquiry.email.as_str(),
            phone,
            product: &inquiry.product,
            message: &inquiry.message,
            date: &date,
        }
        .render()?;
        let text = InquiryNotificationText {
            name: &inquiry.name,
            email: inquiry.email.as_str(),
            phone,
            product: &inquiry.product,
            message: &inquiry.message,
            date: &date,
        }
        .render()?;

        let subject = format!("New Inquiry - {}", inquiry.product);
        self.send_multipart_email(&self.notify_address, &subject, &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Notification email sent");
        Ok(())
    }
}
