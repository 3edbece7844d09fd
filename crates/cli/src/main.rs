//! Rosegold CLI - drive the storefront store from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a ring in size 6, then look at the cart
//! rosegold cart add 1 --size 6
//! rosegold cart show
//!
//! # Save a necklace and move everything saved into the cart
//! rosegold wishlist toggle 2
//! rosegold wishlist move-all
//!
//! # Typeahead phrases for "neck"
//! rosegold suggest neck
//!
//! # Gold bracelets, cheapest first
//! rosegold search bracelet --metal Gold --sort price-low
//!
//! # Subtotal, tax and total
//! rosegold summary
//! ```
//!
//! Every command hydrates the persisted cart and wishlist first, so state
//! carries over between invocations when `ROSEGOLD_STORAGE=file` (the
//! default).

#![cfg_attr(not(test), forbid(unsafe_code))]
// Terminal output is this binary's interface.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rosegold_storefront::{Storefront, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rosegold")]
#[command(author, version, about = "Rosegold storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the shopping cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Inspect and edit the wishlist
    Wishlist {
        #[command(subcommand)]
        action: commands::wishlist::WishlistAction,
    },
    /// Search the catalog
    Search(commands::search::SearchArgs),
    /// Suggest search phrases for a partial query
    Suggest {
        /// What has been typed so far
        query: String,
    },
    /// Show the order summary for the current cart
    Summary,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rosegold: {e}");
            return ExitCode::from(2);
        }
    };

    // Sentry must be initialized before the subscriber. The guard flushes
    // on drop, so every path out of `main` returns rather than exiting.
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rosegold_storefront=info,rosegold_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    exit_code(run(cli, config))
}

/// Log a failed command and map the outcome to the process exit status.
fn exit_code(result: Result<(), Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(
        storage = ?config.storage,
        data_dir = %config.data_dir.display(),
        "Loaded configuration"
    );

    let mut storefront = Storefront::new(config);
    storefront.hydrate();

    let outcome = match cli.command {
        Commands::Cart { action } => commands::cart::run(&mut storefront, action),
        Commands::Wishlist { action } => commands::wishlist::run(&mut storefront, action),
        Commands::Search(args) => commands::search::run(&storefront, &args),
        Commands::Suggest { query } => {
            commands::search::suggest(&storefront, &query);
            Ok(())
        }
        Commands::Summary => {
            commands::summary::run(&storefront);
            Ok(())
        }
    };

    commands::print_toasts(&storefront);
    storefront.shutdown();
    outcome
}
