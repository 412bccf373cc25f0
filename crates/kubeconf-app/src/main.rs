mod cli;
mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kubeconf_config::{discover_kubeconfig_paths, AppConfig, OutputFormat};
use kubeconf_core::KubeConfigSet;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Runs before settings are loaded: the target file usually does not exist yet.
    if cli.command == Command::InitConfig {
        let path = init_config(&cli)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    init_tracing(&config.general.log_level);

    let paths = discover_kubeconfig_paths(&cli.kubeconfig, &config.kubeconfig.paths)?;
    tracing::debug!(?paths, "using kubeconfig files");

    let mut set = KubeConfigSet::new(paths)?;
    set.ensure_loaded().await.context("failed to load kubeconfig")?;

    let output = cli.output.map(OutputFormat::from).unwrap_or(config.output());
    tracing::debug!(%output, command = ?cli.command, "running");
    commands::run(&cli.command, &mut set, output, &mut io::stdout()).await
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn init_config(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.config {
        Some(path) => {
            AppConfig::init_at(path)?;
            Ok(path.clone())
        }
        None => AppConfig::init_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_config_writes_to_config_flag_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings").join("kubeconf.toml");
        let cli = Cli::parse_from(["kubeconf", "--config", path.to_str().unwrap(), "init-config"]);

        assert_eq!(init_config(&cli).unwrap(), path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), kubeconf_config::DEFAULT_CONFIG);
        assert!(init_config(&cli).is_err());
    }
}
