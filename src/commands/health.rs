use anyhow::{Context, Result};
use std::time::Instant;

use shiftplan::config::Config;
use shiftplan::optimizer::OptimizerClient;

pub async fn health(config: &Config) -> Result<()> {
    let client =
        OptimizerClient::new(config.client_config()).context("Failed to create optimizer client")?;

    let started = Instant::now();
    match client.health().await {
        Ok(()) => {
            println!(
                "Optimizer at {} is available ({} ms)",
                config.optimizer.url,
                started.elapsed().as_millis()
            );
            Ok(())
        }
        Err(e) => {
            println!("Optimizer at {} is unavailable: {e}", config.optimizer.url);
            anyhow::bail!("optimizer unavailable")
        }
    }
}
