use crate::domain::{escape_html, EmailAddress, SubmissionRequest};
use crate::email_client::EmailMessage;

/// Who receives contact submissions and how outgoing emails are signed
#[derive(Debug, Clone)]
pub struct ContactRouting {
    pub operator: EmailAddress,
    pub notification_sender: String,
    pub confirmation_sender: String,
    pub brand_name: String,
}

/// The two emails produced by a contact submission
#[derive(Debug)]
pub struct RenderedNotification {
    /// Sent to the operator, replies go to the submitter
    pub operator_notification: EmailMessage,
    /// Sent back to the submitter
    pub submitter_confirmation: EmailMessage,
}

impl RenderedNotification {
    /// Render both emails for a submission
    pub fn render(submission: &SubmissionRequest, routing: &ContactRouting) -> Self {
        Self {
            operator_notification: operator_notification(submission, routing),
            submitter_confirmation: submitter_confirmation(submission, routing),
        }
    }
}

/// HTML-escaped copy of the submission fields
struct EscapedFields {
    name: String,
    email: String,
    phone: String,
    message: String,
}

impl EscapedFields {
    fn new(submission: &SubmissionRequest) -> Self {
        Self {
            name: escape_html(submission.name()),
            email: escape_html(submission.email().as_ref()),
            phone: escape_html(submission.phone()),
            message: escape_html(submission.message()),
        }
    }
}

/// Render the email that tells the operator about a new submission
pub fn operator_notification(
    submission: &SubmissionRequest,
    routing: &ContactRouting,
) -> EmailMessage {
    let EscapedFields {
        name,
        email,
        phone,
        message,
    } = EscapedFields::new(submission);
    let brand = escape_html(&routing.brand_name);

    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; background-color: #f9fafb; padding: 20px; border-radius: 8px;">
  <div style="background-color: white; padding: 30px; border-radius: 8px;">
    <h2 style="color: #1f2937; margin-top: 0;">New Contact Form Submission</h2>
    <div style="border-left: 4px solid #4f46e5; padding-left: 16px; margin: 20px 0;">
      <p><strong>Name:</strong><br/><span>{name}</span></p>
      <p><strong>Email:</strong><br/><a href="mailto:{email}">{email}</a></p>
      <p><strong>Phone:</strong><br/><span>{phone}</span></p>
      <p><strong>Message:</strong></p>
      <div style="background-color: #f3f4f6; padding: 12px; border-radius: 4px; white-space: pre-wrap; word-wrap: break-word;">{message}</div>
    </div>
    <p style="color: #6b7280; font-size: 12px;">This email was sent from the {brand} contact form.</p>
  </div>
</div>"#
    );
    let text_body = format!(
        "New contact form submission\n\n\
        Name: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}\n",
        submission.name(),
        submission.email(),
        submission.phone(),
        submission.message()
    );

    EmailMessage {
        recipient: routing.operator.clone(),
        sender_name: routing.notification_sender.clone(),
        reply_to: Some(submission.email().clone()),
        subject: format!("New Contact Form Submission from {}", submission.name()),
        html_body,
        text_body,
    }
}

/// Render the email that acknowledges a submission to the person who sent it
pub fn submitter_confirmation(
    submission: &SubmissionRequest,
    routing: &ContactRouting,
) -> EmailMessage {
    let EscapedFields { name, message, .. } = EscapedFields::new(submission);
    let brand = escape_html(&routing.brand_name);

    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; background-color: #f9fafb; padding: 20px; border-radius: 8px;">
  <div style="background-color: white; padding: 30px; border-radius: 8px;">
    <h2 style="color: #1f2937; margin-top: 0;">Thank you for reaching out!</h2>
    <p>Hi {name},</p>
    <p>We've received your message and will get back to you as soon as possible.</p>
    <div style="background-color: #f3f4f6; padding: 16px; border-radius: 6px; margin: 20px 0; border-left: 4px solid #10b981;">
      <p style="margin: 0 0 8px 0; font-weight: bold;">Your message:</p>
      <p style="margin: 0; white-space: pre-wrap; word-wrap: break-word;">{message}</p>
    </div>
    <p>Best regards,<br/><strong>The {brand} Team</strong></p>
  </div>
</div>"#
    );
    let text_body = format!(
        "Hi {},\n\n\
        We've received your message and will get back to you as soon as possible.\n\n\
        Your message:\n{}\n\n\
        Best regards,\nThe {} Team\n",
        submission.name(),
        submission.message(),
        routing.brand_name
    );

    EmailMessage {
        recipient: submission.email().clone(),
        sender_name: routing.confirmation_sender.clone(),
        reply_to: None,
        subject: format!("We received your message - {}", routing.brand_name),
        html_body,
        text_body,
    }
}
