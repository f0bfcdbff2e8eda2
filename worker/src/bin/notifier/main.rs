use clap::Parser;
use reservation_notifier::delivery_config::DeliveryConfig;
use reservation_notifier::environment::Environment;
use reservation_notifier::notification_dispatcher::NotificationDispatcher;
use reservation_notifier::reservation_pipeline::ReservationPipeline;
use reservation_notifier::shutdown::Shutdown;
use reservation_notifier_worker::cli::Cli;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = dotenvy::dotenv();

    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let rust_log = Environment::string("RUST_LOG", "INFO,hyper=WARN,hyper_util=WARN,reqwest=WARN");

    tracing_subscriber::registry()
        .with(EnvFilter::new(rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Starting...");

    let config = match DeliveryConfig::from_env() {
        Ok(config) => cli.apply(config),
        Err(error) => {
            error!("Fatal error in main: {}", error);
            return ExitCode::FAILURE;
        },
    };

    let dispatcher = NotificationDispatcher::new(config).with_graceful_shutdown(Shutdown::signal("Stopping notification dispatch..."));

    match ReservationPipeline::run(&cli.input, &cli.output, dispatcher).await {
        Ok(report) => {
            info!(
                "All stages completed: invalid={} processed={} confirmations={} success={} failed={} dry_run={} interrupted={}",
                report.invalid_count,
                report.processed_count,
                report.confirmation_count,
                report.summary.success_count,
                report.summary.failure_count,
                report.summary.dry_run,
                report.summary.interrupted
            );
            ExitCode::SUCCESS
        },
        Err(error) => {
            error!("Fatal error in main: {}", error);
            ExitCode::FAILURE
        },
    }
}
