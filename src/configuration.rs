use crate::domain::EmailAddress;
use crate::smtp_email_sender::{SmtpCredentials, SmtpTls};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub sender_email: String,
    pub sender_name: String,
    pub recipient_email: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub transport: TransportSettings,
}

/// Which delivery mechanism relays quote requests to the business inbox.
#[derive(serde::Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransportSettings {
    Smtp {
        host: String,
        #[serde(deserialize_with = "deserialize_number_from_string")]
        port: u16,
        tls: SmtpTls,
        username: Option<String>,
        password: Option<Secret<String>>,
    },
    Http {
        base_url: String,
        authorization_token: Secret<String>,
    },
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.sender_email.clone())
    }

    pub fn recipient(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.recipient_email.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

impl TransportSettings {
    /// SMTP credentials, if the relay requires authentication. A username without a password
    /// authenticates with an empty one.
    pub fn smtp_credentials(&self) -> Option<SmtpCredentials> {
        match self {
            TransportSettings::Smtp {
                username: Some(username),
                password,
                ..
            } => Some(SmtpCredentials {
                username: username.clone(),
                password: password
                    .clone()
                    .unwrap_or_else(|| Secret::new(String::new())),
            }),
            _ => None,
        }
    }
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

/// Layers, from the lowest to the highest priority:
/// * `configuration/base.yaml`;
/// * `configuration/{local,production}.yaml`, picked by `APP_ENVIRONMENT` (defaults to `local`);
/// * environment variables prefixed with `APP`, `__` separating nested keys
///   (e.g. `APP_EMAIL_CLIENT__TRANSPORT__PASSWORD`).
///
/// Secrets are expected to come from the last layer.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
