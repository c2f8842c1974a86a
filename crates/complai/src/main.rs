// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Complai - complaint-letter assistant for El Prat de Llobregat.
//!
//! This is the binary entry point for the Complai HTTP service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Complai - complaint-letter assistant for El Prat de Llobregat.
#[derive(Parser, Debug)]
#[command(name = "complai", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config_file {
        Some(path) => complai_config::load_and_validate_path(path),
        None => complai_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            complai_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match complai_config::to_redacted_toml(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                complai_config::render_errors(&[e]);
                std::process::exit(1);
            }
        },
        None => {
            println!("complai: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_serve_with_config_file() {
        let cli = Cli::try_parse_from(["complai", "serve", "--config-file", "/tmp/c.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.config_file, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["complai", "shell"]).is_err());
    }

    #[test]
    fn inline_config_validates() {
        let config = complai_config::load_and_validate_str("[gateway]\nport = 9090\n")
            .expect("inline config should be valid");
        assert_eq!(config.agent.name, "complai");
        assert_eq!(config.gateway.port, 9090);
    }
}
