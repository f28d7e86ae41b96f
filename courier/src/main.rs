use clap::Parser;
use metrics_exporter_statsd::StatsdBuilder;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
enum CliCommand {
    /// Run the ingress gateway
    Gateway,
    /// Run the relay worker
    Worker,
}

fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Installs the StatsD exporter when STATSD_HOST is set; metric emission
/// is a no-op otherwise.
fn init_metrics() {
    let Ok(host) = std::env::var("STATSD_HOST") else {
        return;
    };
    let port = std::env::var("STATSD_PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8125);

    match StatsdBuilder::from(host.as_str(), port).build(Some("courier")) {
        Ok(recorder) => {
            if metrics::set_global_recorder(recorder).is_err() {
                tracing::warn!("metrics recorder was already installed");
            }
        }
        Err(error) => tracing::warn!(%error, "failed to initialize statsd metrics exporter"),
    }
}

#[tokio::main]
async fn main() {
    init_telemetry();
    init_metrics();

    match CliCommand::parse() {
        CliCommand::Gateway => {
            let config = match gateway::config::Config::from_env() {
                Ok(config) => config,
                Err(error) => {
                    tracing::error!(%error, "gateway configuration is incomplete");
                    std::process::exit(1);
                }
            };
            if let Err(error) = gateway::run(config).await {
                tracing::error!(%error, "gateway exited with an error");
                std::process::exit(1);
            }
        }
        CliCommand::Worker => {
            let config = match worker::config::Config::from_env() {
                Ok(config) => config,
                Err(error) => {
                    tracing::error!(%error, "worker configuration is incomplete");
                    std::process::exit(1);
                }
            };
            worker::run(config).await;
        }
    }
}
