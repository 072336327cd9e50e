use browwraps::configuration::get_configuration;
use browwraps::startup::Application;
use browwraps::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("browwraps".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    tracing::info!(port = application.port(), "Accepting quote requests");
    application.run_until_stopped().await?;

    Ok(())
}
