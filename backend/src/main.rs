//! Cat Box Planner - command line
//!
//! Calculates feeding plans for subscription boxes and records orders.
//!
//! Usage:
//! ```bash
//! # Calculate a plan from a JSON request
//! cbp plan request.json
//!
//! # Calculate from raw form fields
//! cbp plan form.json --form
//!
//! # Place an order and list stored orders
//! cbp order order.json
//! cbp orders
//! cbp show CAT-20250307-3F2A9C
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cbp_backend::{commands, repository, services::OrderService, AppError, Config};

#[derive(Parser)]
#[command(
    name = "cbp",
    about = "Cat Box Planner",
    long_about = "Calculates daily energy needs, weekly feeding schedules and box contents for cats, and records box orders."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate a plan and print the result
    Plan {
        /// JSON file with the plan request
        file: PathBuf,

        /// The file holds raw form fields (text values)
        #[arg(long)]
        form: bool,
    },

    /// Calculate, store and print an order
    Order {
        /// JSON file with the order request
        file: PathBuf,
    },

    /// List stored orders
    Orders,

    /// Print a stored order
    Show {
        /// Order number, e.g. CAT-20250307-3F2A9C
        order_number: String,
    },

    /// Print the box catalog
    Catalog,
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cbp=debug,cbp_backend=debug,shared=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.logging.filter.as_str().into())
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn report(err: &AppError) {
    let mut stderr = std::io::stderr();
    if let AppError::PlanRejected(issues) = err {
        for message in issues.messages() {
            let _ = writeln!(stderr, "{}", message);
        }
        return;
    }
    match serde_json::to_string_pretty(&err.to_response()) {
        Ok(json) => {
            let _ = writeln!(stderr, "{}", json);
        }
        Err(_) => {
            let _ = writeln!(stderr, "{}", err);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            report(&AppError::from(err));
            return Ok(ExitCode::FAILURE);
        }
    };
    init_tracing(&config, cli.verbose);

    tracing::debug!(environment = %config.environment, "configuration loaded");

    let service = OrderService::new(
        repository::from_config(&config.storage),
        config.catalog(),
        config.planner.clone(),
    );

    let mut stdout = std::io::stdout().lock();
    let outcome = match cli.command {
        Command::Plan { file, form } => commands::plan(&service, &file, form, &mut stdout).await,
        Command::Order { file } => commands::order(&service, &file, &mut stdout).await,
        Command::Orders => commands::orders(&service, &mut stdout).await,
        Command::Show { order_number } => {
            commands::show(&service, &order_number, &mut stdout).await
        }
        Command::Catalog => commands::catalog(&service, &mut stdout),
    };

    stdout.flush().context("failed to flush output")?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(code = err.code(), "command failed");
            report(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}
