use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use pc_core::config::RenderConfig;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    config.clamp_all();

    // 4. Rendu complet avant toute écriture : jamais de sortie partielle
    let text = pipeline::from_image_path(&cli.image, &config)?.to_string();

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("Écriture sur stdout impossible")?;
    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(stdout).context("Écriture sur stdout impossible")?;
    }
    Ok(())
}

/// Load `--config` if it exists, otherwise fall back to the defaults.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    if cli.config.exists() {
        pc_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(RenderConfig::default())
    }
}
