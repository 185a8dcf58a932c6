use std::time;

use reqwest::Client;
use url::{ParseError, Url};

use crate::domain::SubmissionRequest;
use crate::routes::{ContactAck, ErrorBody};
use crate::transport::{TransportError, GENERIC_FAILURE};

/// Request body sent to the contact endpoint
#[derive(serde::Serialize)]
struct ContactRequest<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// Client for the `/api/contact` endpoint
#[derive(Debug)]
pub struct ContactApiClient {
    http_client: Client,
    endpoint: Url,
    timeout: time::Duration,
}

impl ContactApiClient {
    pub fn new(base_url: &Url, timeout: time::Duration) -> Result<Self, ParseError> {
        Ok(Self {
            http_client: Client::new(),
            endpoint: base_url.join("api/contact")?,
            timeout,
        })
    }

    /// Get configured timeout
    pub const fn timeout(&self) -> time::Duration {
        self.timeout
    }

    /// Post a submission to the contact endpoint
    ///
    /// Error answers carry a reason meant for the visitor; it is passed along as a rejection.
    #[tracing::instrument(
        name = "Post submission to contact endpoint",
        skip(self, submission),
        fields(endpoint = %self.endpoint, submitter_email = %submission.email())
    )]
    pub async fn post_submission(
        &self,
        submission: &SubmissionRequest,
    ) -> Result<ContactAck, TransportError> {
        let body = ContactRequest {
            name: submission.name(),
            email: submission.email().as_ref(),
            phone: submission.phone(),
            message: submission.message(),
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json::<ContactAck>().await?)
        } else {
            let reason = response
                .json::<ErrorBody>()
                .await
                .map_or_else(|_| GENERIC_FAILURE.to_owned(), |body| body.error);
            Err(TransportError::Rejected(reason))
        }
    }
}
