use clap::Parser;
use reservation_notifier::delivery_config::DeliveryConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reservation-notifier", about = "Process flight reservations and notify confirmations.")]
pub struct Cli {
    /// Input CSV path
    #[arg(long, default_value = "data/reservations.csv")]
    pub input: PathBuf,

    /// Output directory
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Force dry-run (overrides DRY_RUN)
    #[arg(long)]
    pub dry_run: bool,

    /// Batch size for notifications
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Parallel workers for notification I/O
    #[arg(long)]
    pub workers: Option<usize>,
}

impl Cli {
    /// Flags win over values read from the environment.
    pub fn apply(
        &self,
        config: DeliveryConfig,
    ) -> DeliveryConfig {
        let mut config = config;

        if self.dry_run {
            config = config.with_dry_run(true);
        }
        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }
        if let Some(workers) = self.workers {
            config = config.with_max_workers(workers);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment_values() {
        let cli = Cli::parse_from(["reservation-notifier", "--dry-run", "--batch-size", "4", "--workers", "2"]);
        let base = DeliveryConfig::default().with_dry_run(false).with_batch_size(25).with_max_workers(8);

        let config = cli.apply(base);

        assert!(config.dry_run);
        assert_eq!(4, config.batch_size);
        assert_eq!(2, config.max_workers);
    }

    #[test]
    fn absent_flags_keep_environment_values() {
        let cli = Cli::parse_from(["reservation-notifier"]);
        let base = DeliveryConfig::default().with_dry_run(false).with_batch_size(25).with_max_workers(8);

        let config = cli.apply(base);

        assert!(!config.dry_run);
        assert_eq!(25, config.batch_size);
        assert_eq!(8, config.max_workers);
        assert_eq!(PathBuf::from("data/reservations.csv"), cli.input);
        assert_eq!(PathBuf::from("output"), cli.output);
    }
}
