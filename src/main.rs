//
//  pantry-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pantry_cli::cli::{Cli, Commands};
use pantry_cli::{exit_codes, util};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(util::exit_code_for(&e));
        }
    }
}

/// Initialize logging from `PANTRY_DEBUG`
fn init_logging() {
    let filter = EnvFilter::try_from_env("PANTRY_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Product(cmd) => cmd.run(&cli.global).await,
        Commands::Category(cmd) => cmd.run(&cli.global).await,
        Commands::Pantry(cmd) => cmd.run(&cli.global).await,
        Commands::List(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", pantry_cli::APP_NAME, pantry_cli::VERSION);
            Ok(())
        }
    }
}
