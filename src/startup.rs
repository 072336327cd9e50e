use crate::configuration::{EmailClientSettings, Settings, TransportSettings};
use crate::email_client::EmailClient;
use crate::mail_transport::MailTransport;
use crate::notification::NotificationComposer;
use crate::routes;
use crate::smtp_email_sender::SmtpEmailSender;
use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let transport = get_mail_transport(&configuration.email_client)?;
        Self::build_with_transport(configuration, transport).await
    }

    /// Same as `build`, with a `MailTransport` supplied by the caller instead of the one described
    /// by the configuration.
    pub async fn build_with_transport(
        configuration: Settings,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self, anyhow::Error> {
        let composer = get_notification_composer(&configuration.email_client)?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
        //Retrieve the port assigned to us by the OS
        let port = listener.local_addr()?.port();
        let server = run(listener, composer, transport)?;

        // We "save" the bound port in one of `Application`'s fields.
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that this function only returns when the application
    /// is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_notification_composer(
    settings: &EmailClientSettings,
) -> Result<NotificationComposer, anyhow::Error> {
    let sender = settings
        .sender()
        .map_err(anyhow::Error::msg)
        .context("Invalid sender email address.")?;
    let recipient = settings
        .recipient()
        .map_err(anyhow::Error::msg)
        .context("Invalid recipient email address.")?;
    NotificationComposer::new(settings.sender_name.clone(), sender, recipient)
        .context("Failed to load the notification templates.")
}

pub fn get_mail_transport(
    settings: &EmailClientSettings,
) -> Result<Arc<dyn MailTransport>, anyhow::Error> {
    let timeout = settings.timeout();
    let transport: Arc<dyn MailTransport> = match &settings.transport {
        TransportSettings::Smtp { host, port, tls, .. } => Arc::new(
            SmtpEmailSender::new(
                host,
                *port,
                *tls,
                settings.transport.smtp_credentials(),
                timeout,
            )
            .context("Unable to build the SMTP transport")?,
        ),
        TransportSettings::Http {
            base_url,
            authorization_token,
        } => Arc::new(
            EmailClient::new(base_url.clone(), authorization_token.clone(), timeout)
                .context("Unable to build email client")?,
        ),
    };
    Ok(transport)
}

/// `web::Data` wraps its content in an `Arc`: every worker spawned by `HttpServer` shares the same
/// composer and transport, neither of which holds mutable state.
///
/// `web::Data::from` lets us register the transport behind `dyn MailTransport`, so the handler
/// does not know (or care) whether it talks to an SMTP relay, an HTTP API or a test double.
pub fn run(
    listener: TcpListener,
    composer: NotificationComposer,
    transport: Arc<dyn MailTransport>,
) -> Result<Server, std::io::Error> {
    let composer = web::Data::new(composer);
    let transport: web::Data<dyn MailTransport> = web::Data::from(transport);
    let server = HttpServer::new(move || {
        App::new()
            // Instead of `Logger::default`
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(routes::health_check))
            .route("/api/send-email", web::post().to(routes::send_quote_request))
            .app_data(composer.clone())
            .app_data(transport.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
