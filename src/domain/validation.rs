use std::fmt;

use crate::domain::{is_valid_email, ContactDraft, Field};

/// A single broken validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Field is empty or whitespace-only
    Blank(Field),
    /// Email is present but does not look like an address
    MalformedEmail,
}

impl Violation {
    /// Message shown to the visitor next to the form
    pub const fn form_message(self) -> &'static str {
        match self {
            Self::Blank(Field::Name) => "Name is required",
            Self::Blank(Field::Email) | Self::MalformedEmail => "Valid email is required",
            Self::Blank(Field::Phone) => "Phone number is required",
            Self::Blank(Field::Message) => "Message is required",
        }
    }
}

/// Validation error type, holding every broken rule in validation order (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn malformed_email() -> Self {
        Self {
            violations: vec![Violation::MalformedEmail],
        }
    }

    /// First broken rule, the one that is reported to the visitor
    pub fn first(&self) -> Violation {
        self.violations[0]
    }

    /// All broken rules, in validation order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Message for the first broken rule
    pub fn form_message(&self) -> &'static str {
        self.first().form_message()
    }

    /// Whether at least one field is missing altogether
    pub fn has_blank_field(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::Blank(_)))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_message())
    }
}

impl std::error::Error for ValidationError {}

/// Check a draft against the contact form rules: name, email, phone and message are required,
/// and email must look like an address. Whitespace-only values count as blank.
pub fn validate(draft: &ContactDraft) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    for field in Field::ALL {
        let value = draft.get(field);
        if value.trim().is_empty() {
            violations.push(Violation::Blank(field));
        } else if field == Field::Email && !is_valid_email(value) {
            violations.push(Violation::MalformedEmail);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
