use std::{env, time};

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use url::{ParseError, Url};

use crate::contact_client::ContactApiClient;
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::form_relay::{FormRelayClient, FormRelayError, FormRelayFields};
use crate::notifications::ContactRouting;

/// Settings
#[derive(Clone, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub contact: ContactSettings,
    pub form_relay: FormRelaySettings,
    pub contact_api: ContactApiSettings,
}

impl Settings {
    /// Get settings from configuration files
    pub fn get_config() -> Result<Self, ConfigError> {
        let path = env::current_dir().expect("Failed to determine the current directory");
        let config_dir = path.join("config");

        // Detect the running environment (default: `dev`)
        let env: Env = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "dev".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        // Read the configuration from files and environment variables
        Config::builder()
            // Base configuration file
            .add_source(File::from(config_dir.join("base.yaml")).required(true))
            // Environment-specific configuration file
            .add_source(File::from(config_dir.join(env.as_str())).required(true))
            // Environment variables (e.g., `CONTACT_RELAY__EMAIL_CLIENT__AUTHORIZATION_TOKEN=re_xxx`
            // would set Settings.email_client.authorization_token to re_xxx)
            .add_source(
                Environment::with_prefix("CONTACT_RELAY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

/// Application settings
#[derive(Clone, serde::Deserialize)]
pub struct ApplicationSettings {
    pub app_host: String,
    pub app_port: u16,
}

/// Email client settings
#[derive(Clone, serde::Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub authorization_token: SecretString,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    /// Build the email client
    pub fn client(self) -> anyhow::Result<EmailClient> {
        let base_url = self.base_url()?;
        let sender_email = self.sender_email().map_err(anyhow::Error::msg)?;
        let timeout = self.timeout();
        Ok(EmailClient::new(
            &base_url,
            sender_email,
            self.authorization_token,
            timeout,
        )?)
    }

    /// Parse base URL
    pub fn base_url(&self) -> Result<Url, ParseError> {
        Url::parse(&self.base_url)
    }

    /// Parse sender email
    pub fn sender_email(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.sender_email.clone())
    }

    /// Get configured timeout
    pub const fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_millis)
    }
}

/// Contact routing settings
#[derive(Clone, serde::Deserialize)]
pub struct ContactSettings {
    pub operator_email: String,
    pub notification_sender: String,
    pub confirmation_sender: String,
    pub brand_name: String,
}

impl ContactSettings {
    /// Build the contact routing
    pub fn routing(self) -> Result<ContactRouting, String> {
        Ok(ContactRouting {
            operator: EmailAddress::parse(self.operator_email)?,
            notification_sender: self.notification_sender,
            confirmation_sender: self.confirmation_sender,
            brand_name: self.brand_name,
        })
    }
}

/// Form relay settings
#[derive(Clone, serde::Deserialize)]
pub struct FormRelaySettings {
    pub action_url: String,
    pub fields: FormRelayFields,
    pub timeout_millis: u64,
}

impl FormRelaySettings {
    /// Build the form relay client
    pub fn client(self) -> Result<FormRelayClient, FormRelayError> {
        let timeout = self.timeout();
        FormRelayClient::new(&self.action_url, self.fields, timeout)
    }

    /// Get configured timeout
    pub const fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_millis)
    }
}

/// Contact endpoint client settings, used by the terminal form
#[derive(Clone, serde::Deserialize)]
pub struct ContactApiSettings {
    pub base_url: String,
    pub timeout_millis: u64,
}

impl ContactApiSettings {
    /// Build the contact endpoint client
    pub fn client(&self) -> Result<ContactApiClient, ParseError> {
        ContactApiClient::new(&Url::parse(&self.base_url)?, self.timeout())
    }

    /// Get configured timeout
    pub const fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_millis)
    }
}

/// Available runtime environments
#[derive(Debug)]
pub enum Env {
    Development,
    Production,
}

impl Env {
    /// Represent environment as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prd",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Self::Development),
            "prd" => Ok(Self::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `dev` or `prd`"
            )),
        }
    }
}
