use std::time;

use reqwest::multipart::Form;
use reqwest::Client;
use url::Url;

use crate::domain::{Field, SubmissionRequest};

/// Provider-assigned identifiers for each contact field (e.g. `entry.123456789`)
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FormRelayFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormRelayFields {
    /// Get the provider identifier for a contact field
    pub fn id(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }
}

/// Form relay error type
#[derive(thiserror::Error, Debug)]
pub enum FormRelayError {
    #[error("Invalid form relay endpoint")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("No provider field identifier configured for `{0}`")]
    MissingFieldId(Field),
    #[error("Failed to dispatch the submission to the form relay")]
    Dispatch(#[from] reqwest::Error),
}

/// Proof that a submission left this process. It says nothing about what the provider did with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Dispatched;

/// Client for a third-party form collection endpoint
///
/// The provider only accepts opaque cross-origin posts, so its answer is never inspected:
/// a submission is assumed delivered as soon as the request went out without a local fault.
/// Provider-side rejections are invisible to the caller.
#[derive(Debug)]
pub struct FormRelayClient {
    http_client: Client,
    action_url: Url,
    fields: FormRelayFields,
    timeout: time::Duration,
}

impl FormRelayClient {
    /// Build a form relay client, checking that the endpoint and all field identifiers are usable
    pub fn new(
        action_url: &str,
        fields: FormRelayFields,
        timeout: time::Duration,
    ) -> Result<Self, FormRelayError> {
        let action_url = Url::parse(action_url)?;
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|f| fields.id(*f).trim().is_empty())
        {
            return Err(FormRelayError::MissingFieldId(field));
        }
        Ok(Self {
            http_client: Client::new(),
            action_url,
            fields,
            timeout,
        })
    }

    /// Fire a submission at the form relay endpoint
    #[tracing::instrument(
        name = "Dispatch submission to form relay",
        skip(self, submission),
        fields(action_url = %self.action_url, submitter_email = %submission.email())
    )]
    pub async fn submit(
        &self,
        submission: &SubmissionRequest,
    ) -> Result<Dispatched, FormRelayError> {
        let form = Field::ALL.into_iter().fold(Form::new(), |form, field| {
            form.text(self.fields.id(field).to_owned(), submission.get(field).to_owned())
        });

        let response = self
            .http_client
            .post(self.action_url.clone())
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;

        // Anything that came back counts as dispatched
        tracing::debug!(status = %response.status(), "Form relay answered");
        Ok(Dispatched)
    }
}
