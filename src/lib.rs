pub mod configuration;
pub mod contact_client;
pub mod contact_form;
pub mod domain;
pub mod email_client;
pub mod form_relay;
pub mod notifications;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod transport;
pub mod utils;
