use std::time;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use url::{ParseError, Url};

use crate::domain::EmailAddress;

/// Email client data
#[derive(Debug)]
pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    sender: EmailAddress,
    authorization_token: SecretString,
    timeout: time::Duration,
}

/// Outbound email
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub recipient: EmailAddress,
    pub sender_name: String,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Request body accepted by the email API
#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Error body returned by the email API
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Send email error type
#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    /// The email API answered and refused to send the message
    #[error("The email API rejected the message with status {status}")]
    Rejected {
        status: StatusCode,
        body: Option<ApiErrorBody>,
    },
    /// The email API could not be reached, or its answer could not be read
    #[error("Failed to reach the email API")]
    Transport(#[from] reqwest::Error),
}

impl SendEmailError {
    /// Whether the email API itself reported the failure
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl EmailClient {
    /// Build a client for the email API at `base_url`
    ///
    /// Fails if `base_url` cannot carry the send endpoint path (e.g. `mailto:` URLs).
    pub fn new(
        base_url: &Url,
        sender: EmailAddress,
        authorization_token: SecretString,
        timeout: time::Duration,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            http_client: Client::new(),
            endpoint: base_url.join("emails")?,
            sender,
            authorization_token,
            timeout,
        })
    }

    /// Send an email using Resend's REST API
    /// <https://resend.com/docs/api-reference/emails/send-email>
    #[tracing::instrument(
        name = "Send email",
        skip(self, email),
        fields(recipient = %email.recipient, subject = %email.subject)
    )]
    pub async fn send_email(&self, email: &EmailMessage) -> Result<(), SendEmailError> {
        let request_body = SendEmailRequest {
            from: format!("{} <{}>", email.sender_name, self.sender),
            to: email.recipient.as_ref(),
            subject: &email.subject,
            html: &email.html_body,
            text: &email.text_body,
            reply_to: email.reply_to.as_ref().map(AsRef::as_ref),
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.json::<ApiErrorBody>().await.ok();
            Err(SendEmailError::Rejected { status, body })
        }
    }
}
