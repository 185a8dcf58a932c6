use std::fmt;

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use tracing::field::display;
use tracing::Span;

use crate::domain::{ContactDraft, SubmissionRequest, ValidationError};
use crate::email_client::{EmailClient, EmailMessage, SendEmailError};
use crate::notifications::{ContactRouting, RenderedNotification};
use crate::utils::error_chain_fmt;

/// Contact request body, any field may be missing
#[derive(Debug, Default, serde::Deserialize)]
pub struct ContactFormData {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    message: Option<String>,
}

impl From<ContactFormData> for ContactDraft {
    fn from(data: ContactFormData) -> Self {
        Self {
            name: data.name.unwrap_or_default(),
            email: data.email.unwrap_or_default(),
            phone: data.phone.unwrap_or_default(),
            message: data.message.unwrap_or_default(),
        }
    }
}

/// Successful contact response body
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ContactAck {
    pub success: bool,
    pub message: String,
}

impl ContactAck {
    fn sent() -> Self {
        Self {
            success: true,
            message: "Email sent successfully".into(),
        }
    }
}

/// Failed contact response body
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Contact error type
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Missing required fields")]
    MissingFields(#[source] ValidationError),
    #[error("Invalid email format")]
    InvalidEmail(#[source] ValidationError),
    #[error("Failed to send email")]
    SendError(#[source] SendEmailError),
    #[error("Failed to process request")]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<ValidationError> for ContactError {
    fn from(e: ValidationError) -> Self {
        if e.has_blank_field() {
            Self::MissingFields(e)
        } else {
            Self::InvalidEmail(e)
        }
    }
}

impl fmt::Debug for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            Self::SendError(_) | Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Only the fixed top-level message reaches the caller, never the cause chain
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Turn unreadable contact request bodies into a generic processing failure
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let err = anyhow::anyhow!("{err}").context("Failed to read the contact request body");
    log_unexpected(&err);
    ContactError::UnexpectedError(err).into()
}

/// Contact handler: relay a visitor message to the operator and acknowledge it to the visitor
#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(body, email_client, routing),
    fields(
        submitter_email = tracing::field::Empty,
        submitter_name = tracing::field::Empty
    )
)]
pub async fn contact(
    body: web::Json<ContactFormData>,
    email_client: web::Data<EmailClient>,
    routing: web::Data<ContactRouting>,
) -> Result<HttpResponse, ContactError> {
    // Never trust client-side validation
    let submission: SubmissionRequest = ContactDraft::from(body.into_inner()).try_into()?;
    Span::current()
        .record("submitter_email", display(submission.email()))
        .record("submitter_name", display(submission.name()));

    let RenderedNotification {
        operator_notification,
        submitter_confirmation,
    } = RenderedNotification::render(&submission, &routing);

    send_operator_notification(&email_client, &operator_notification).await?;
    send_submitter_confirmation(&email_client, &submitter_confirmation).await?;

    Ok(HttpResponse::Ok().json(ContactAck::sent()))
}

/// Send the notification to the operator; nothing else is sent if this fails
#[tracing::instrument(name = "Sending operator notification", skip_all)]
async fn send_operator_notification(
    email_client: &EmailClient,
    email: &EmailMessage,
) -> Result<(), ContactError> {
    match email_client.send_email(email).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_rejection() => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "The email API refused the operator notification"
            );
            Err(ContactError::SendError(e))
        }
        Err(e) => {
            let e = anyhow::Error::new(e).context("Failed to send the operator notification");
            log_unexpected(&e);
            Err(ContactError::UnexpectedError(e))
        }
    }
}

/// Send the acknowledgment to the submitter
///
/// A refusal from the email API is only logged: the operator already has the message.
/// A transport fault still fails the whole request.
#[tracing::instrument(name = "Sending submitter confirmation", skip_all)]
async fn send_submitter_confirmation(
    email_client: &EmailClient,
    email: &EmailMessage,
) -> Result<(), ContactError> {
    match email_client.send_email(email).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_rejection() => {
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "The email API refused the submitter confirmation"
            );
            Ok(())
        }
        Err(e) => {
            let e = anyhow::Error::new(e).context("Failed to send the submitter confirmation");
            log_unexpected(&e);
            Err(ContactError::UnexpectedError(e))
        }
    }
}

fn log_unexpected(e: &anyhow::Error) {
    tracing::error!(
        error.cause_chain = ?e,
        error.message = %e,
        "Failed to process a contact request"
    );
}
