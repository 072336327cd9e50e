use browwraps::configuration::{get_configuration, Settings, TransportSettings};
use browwraps::mail_transport::{Email, MailTransport};
use browwraps::smtp_email_sender::SmtpTls;
use browwraps::startup::Application;
use browwraps::telemetry;
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::MockServer;

pub(crate) struct TestApp {
    pub(crate) address: String,
    pub(crate) email_server: MockServer,
    pub(crate) port: u16,
    pub(crate) api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_quote_request(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/send-email", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw_quote_request(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/send-email", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// A payload the way the contact form posts it when the customer filled in every field.
pub(crate) fn valid_quote_request() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "phone": "",
        "location": "Stuart, FL",
        "boatDetails": "2024 Viking 54",
        "message": "Interested in a quote"
    })
}

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // We cannot assign the output of `get_subscriber` to a variable based on the value TEST_LOG because
    // the sink is part of the type returned by `get_subscriber`, therefore they are not the same type.
    // We could work around it, but this is the most straight-forward way of moving forward.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber);
    }
});

fn test_configuration(email_server: &MockServer) -> Settings {
    let mut c = get_configuration().expect("Failed to read configuration.");
    // Use a random OS port
    c.application.port = 0;
    c.email_client.timeout_milliseconds = 2_000;
    c.email_client.transport = TransportSettings::Http {
        base_url: email_server.uri(),
        authorization_token: Secret::new("test-server-token".to_string()),
    };
    c
}

async fn launch(application: Application, email_server: MockServer) -> TestApp {
    let port = application.port();
    let address = format!("http://127.0.0.1:{}", &port);

    // launch the server as a background task
    // tokio::spawn returns a handle to the spawned future, but we have no use for it here, hence the
    // non-binding let
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        email_server,
        port,
        api_client: reqwest::Client::new(),
    }
}

/// Spawns the application with its HTTP API transport pointed at a `wiremock` server standing in
/// for the email provider.
pub(crate) async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed. All other invocations
    // will instead skip execution.
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let configuration = test_configuration(&email_server);

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application");
    launch(application, email_server).await
}

/// Spawns the application with a `MailTransport` of our choosing.
pub(crate) async fn spawn_app_with_transport(transport: Arc<dyn MailTransport>) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let configuration = test_configuration(&email_server);

    let application = Application::build_with_transport(configuration, transport)
        .await
        .expect("Failed to build application");
    launch(application, email_server).await
}

/// Spawns the application with the SMTP transport pointed at a port nobody listens on.
pub(crate) async fn spawn_app_with_unreachable_smtp_relay() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let mut configuration = test_configuration(&email_server);
    configuration.email_client.transport = TransportSettings::Smtp {
        host: "127.0.0.1".into(),
        port: 1,
        tls: SmtpTls::None,
        username: Some("contact@browwraps.com".into()),
        password: Some(Secret::new("smtp-password-that-must-not-leak".into())),
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application");
    launch(application, email_server).await
}

/// A transport that fails the way a real relay does, with credentials in the error message.
pub(crate) struct FailingTransport {
    pub(crate) attempts: AtomicUsize,
}

impl FailingTransport {
    pub(crate) const LEAKY_DETAIL: &'static str =
        "535 5.7.8 Authentication failed for contact@browwraps.com with password hunter2";

    pub(crate) fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, _email: &Email) -> Result<(), anyhow::Error> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!(Self::LEAKY_DETAIL))
    }
}

/// Keeps every email it is given, so that tests can look at what would have been sent.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    pub(crate) sent: std::sync::Mutex<Vec<Email>>,
}

impl RecordingTransport {
    pub(crate) fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: &Email) -> Result<(), anyhow::Error> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
