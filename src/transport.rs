use std::future::Future;

use crate::contact_client::ContactApiClient;
use crate::domain::SubmissionRequest;
use crate::form_relay::{Dispatched, FormRelayClient, FormRelayError};

/// Message shown to the visitor when a submission fails for a reason they cannot act on
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Transport error type
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The receiving side refused the submission and said why, in words meant for the visitor
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    FormRelay(#[from] FormRelayError),
    #[error("Failed to reach the contact endpoint")]
    Http(#[from] reqwest::Error),
}

impl TransportError {
    /// Message to show next to the form
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected(reason) => reason,
            Self::FormRelay(_) | Self::Http(_) => GENERIC_FAILURE,
        }
    }
}

/// Something that can deliver a validated submission to an external system
pub trait Transport {
    fn deliver(
        &self,
        submission: &SubmissionRequest,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl Transport for FormRelayClient {
    async fn deliver(&self, submission: &SubmissionRequest) -> Result<(), TransportError> {
        let Dispatched = self.submit(submission).await?;
        Ok(())
    }
}

impl Transport for ContactApiClient {
    async fn deliver(&self, submission: &SubmissionRequest) -> Result<(), TransportError> {
        self.post_submission(submission).await?;
        Ok(())
    }
}
