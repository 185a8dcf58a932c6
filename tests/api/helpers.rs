use std::{env, io, sync};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use contact_relay::configuration::Settings;
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_subscriber, init_subscriber};

/// Ensure the tracing stack is initialized only once
static TRACING: sync::LazyLock<()> = sync::LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            io::sink,
        ));
    };
});

/// Operator address configured for test applications
pub const OPERATOR_EMAIL: &str = "operator@example.com";

/// Test application data
pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spin up a test application and return its data
    pub async fn spawn() -> Self {
        // Initialize logging
        sync::LazyLock::force(&TRACING);

        // Launch a mock server to stand in for the email API
        let email_server = MockServer::start().await;

        // Get settings and modify them for testing
        let config = {
            let mut c = Settings::get_config().expect("Failed to read configuration");
            // Listen on a random TCP port
            c.application.app_port = 0;
            // Use the mock server as email API
            c.email_client.base_url = email_server.uri();
            c.email_client.timeout_millis = 200;
            c.contact.operator_email = OPERATOR_EMAIL.into();
            c
        };

        // Build the application and get its address
        let app = Application::build(config).expect("Failed to build application");
        let address = format!("http://127.0.0.1:{}", app.port());

        // Run the application and return its data
        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run_until_stopped());
        Self {
            address,
            email_server,
            api_client: reqwest::Client::new(),
        }
    }

    /// POST a JSON body to the contact endpoint
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// POST a raw body to the contact endpoint
    pub async fn post_contact_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// GET the health check endpoint
    pub async fn get_healthcheck(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/healthcheck", &self.address))
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Requests received by the mock email API, parsed as JSON
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(email_body)
            .collect()
    }
}

/// Parse an email API request body
pub fn email_body(request: &Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).unwrap()
}

/// A mock for the email API send endpoint
pub fn send_email_mock() -> wiremock::MockBuilder {
    Mock::given(path("/emails")).and(method("POST"))
}

/// Email API answer for an accepted message
pub fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({ "id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794" }))
}

/// A valid contact request body
pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Ann",
        "email": "ann@x.com",
        "phone": "555",
        "message": "hi"
    })
}
