use std::time::Duration;

use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{accepted, send_email_mock, valid_body, TestApp, OPERATOR_EMAIL};

#[tokio::test]
async fn contact_returns_a_200_and_sends_two_emails_for_valid_data() {
    let app = TestApp::spawn().await;

    send_email_mock()
        .respond_with(accepted())
        .expect(2)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully");
}

#[tokio::test]
async fn contact_notifies_the_operator_first_then_confirms_to_the_submitter() {
    let app = TestApp::spawn().await;

    send_email_mock()
        .respond_with(accepted())
        .mount(&app.email_server)
        .await;

    app.post_contact(&valid_body()).await;

    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 2);

    let notification = &emails[0];
    assert_eq!(notification["to"], OPERATOR_EMAIL);
    assert_eq!(notification["reply_to"], "ann@x.com");
    assert_eq!(
        notification["subject"],
        "New Contact Form Submission from Ann"
    );
    let html = notification["html"].as_str().unwrap();
    for value in ["Ann", "ann@x.com", "555", "hi"] {
        assert!(html.contains(value), "notification is missing {value}");
    }

    let confirmation = &emails[1];
    assert_eq!(confirmation["to"], "ann@x.com");
    assert!(confirmation["html"].as_str().unwrap().contains("Hi Ann,"));
}

#[tokio::test]
async fn contact_escapes_user_input_in_email_bodies() {
    let app = TestApp::spawn().await;

    send_email_mock()
        .respond_with(accepted())
        .expect(2)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "name": "<img src=x onerror=alert(1)>",
        "email": "ann@x.com",
        "phone": "555",
        "message": "<b>\"hi\" & 'bye'</b>"
    });
    let response = app.post_contact(&body).await;
    assert_eq!(200, response.status().as_u16());

    for email in app.sent_emails().await {
        let html = email["html"].as_str().unwrap();
        assert!(!html.contains("<img"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;&quot;hi&quot; &amp; &#039;bye&#039;&lt;/b&gt;"));
    }
}

#[tokio::test]
async fn contact_returns_a_400_when_fields_are_missing() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            serde_json::json!({ "name": "Ann", "email": "ann@x.com", "phone": "555" }),
            "missing the message",
        ),
        (
            serde_json::json!({ "email": "ann@x.com", "phone": "555", "message": "hi" }),
            "missing the name",
        ),
        (
            serde_json::json!({ "name": "Ann", "phone": "555", "message": "hi" }),
            "missing the email",
        ),
        (
            serde_json::json!({ "name": "Ann", "email": "ann@x.com", "message": "hi" }),
            "missing the phone",
        ),
        (
            serde_json::json!({ "name": "", "email": "ann@x.com", "phone": "555", "message": "hi" }),
            "an empty name",
        ),
        (
            serde_json::json!({ "name": "Ann", "email": "ann@x.com", "phone": "   ", "message": "hi" }),
            "a whitespace-only phone",
        ),
        (
            serde_json::json!({ "name": "Ann", "email": "not-an-email", "phone": "555", "message": "" }),
            "an invalid email and an empty message",
        ),
        (serde_json::json!({}), "an empty object"),
    ];

    for (body, description) in test_cases {
        let response = app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had {description}"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing required fields", "payload had {description}");
    }
}

#[tokio::test]
async fn contact_returns_a_400_when_the_email_is_invalid() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for email in ["ann", "ann@x", "@x.com", "ann@x.com ", "ann @x.com", "ann@@x.com"] {
        let mut body = valid_body();
        body["email"] = email.into();

        let response = app.post_contact(&body).await;

        assert_eq!(400, response.status().as_u16(), "email was {email:?}");
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid email format", "email was {email:?}");
    }
}

#[tokio::test]
async fn contact_returns_a_500_and_skips_the_confirmation_if_the_notification_is_rejected() {
    let app = TestApp::spawn().await;

    send_email_mock()
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "statusCode": 422,
            "name": "validation_error",
            "message": "The `from` domain is not verified."
        })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Failed to send email" }));
}

#[tokio::test]
async fn contact_still_succeeds_if_only_the_confirmation_is_rejected() {
    let app = TestApp::spawn().await;

    send_email_mock()
        .respond_with(accepted())
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    send_email_mock()
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn contact_returns_a_generic_500_if_the_email_api_is_unreachable() {
    let app = TestApp::spawn().await;

    // The client gives up long before the mock answers
    send_email_mock()
        .respond_with(accepted().set_delay(Duration::from_secs(180)))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to process request" })
    );
}

#[tokio::test]
async fn contact_returns_a_generic_500_if_the_confirmation_cannot_be_delivered() {
    let app = TestApp::spawn().await;

    send_email_mock()
        .respond_with(accepted())
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    // The client gives up on the confirmation long before the mock answers
    send_email_mock()
        .respond_with(accepted().set_delay(Duration::from_secs(180)))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to process request" })
    );
    assert_eq!(app.sent_emails().await.len(), 2);
}

#[tokio::test]
async fn contact_returns_a_generic_500_for_an_unreadable_body() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for body in ["{not json", r#"{"name": 42, "email": "ann@x.com"}"#] {
        let response = app.post_contact_raw(body).await;

        assert_eq!(500, response.status().as_u16(), "body was {body}");
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Failed to process request");
    }
}
