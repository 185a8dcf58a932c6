use std::fmt;

use crate::domain::{validate, EmailAddress, ValidationError};

/// Contact form fields, in the order they are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    /// Represent field as a string
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated contact form content, as typed by a visitor or received over the wire
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactDraft {
    /// Get the current value of a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    /// Replace the value of a field
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
    }
}

/// Validated contact submission, ready to be handed to a transport
///
/// Values are kept exactly as submitted: trimming is only used to decide whether a field is blank,
/// so whitespace inside `message` survives into the rendered emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    name: String,
    email: EmailAddress,
    phone: String,
    message: String,
}

impl SubmissionRequest {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get a field value by field identifier
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => self.email.as_ref(),
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }
}

impl TryFrom<ContactDraft> for SubmissionRequest {
    type Error = ValidationError;

    fn try_from(draft: ContactDraft) -> Result<Self, Self::Error> {
        validate(&draft)?;
        let ContactDraft {
            name,
            email,
            phone,
            message,
        } = draft;
        let email = EmailAddress::parse(email).map_err(|_| ValidationError::malformed_email())?;
        Ok(Self {
            name,
            email,
            phone,
            message,
        })
    }
}
