use std::{io, net};

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::notifications::ContactRouting;
use crate::routes::{contact, healthcheck, json_error_handler};

/// Application
pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Build an application based on settings
    pub fn build(config: Settings) -> anyhow::Result<Self> {
        // Build the email client once, it is shared by every worker
        let email_client = config.email_client.client()?;
        let routing = config.contact.routing().map_err(anyhow::Error::msg)?;

        // Run the HTTP server and return its data
        let listener = net::TcpListener::bind(format!(
            "{}:{}",
            config.application.app_host, config.application.app_port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run_server(listener, email_client, routing)?;
        Ok(Self { server, port })
    }

    /// Get application port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Run application until it is stopped
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server.await
    }
}

/// Run the HTTP server
pub fn run_server(
    listener: net::TcpListener,
    email_client: EmailClient,
    routing: ContactRouting,
) -> anyhow::Result<Server> {
    // Prepare data to be added the application context
    let email_client = web::Data::new(email_client);
    let routing = web::Data::new(routing);

    // Start the HTTP server
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/healthcheck", web::get().to(healthcheck))
            .route("/api/contact", web::post().to(contact))
            .app_data(
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_error_handler),
            )
            .app_data(email_client.clone())
            .app_data(routing.clone())
    })
    .listen(listener)?
    .run())
}
