//! Library entry for the `login` crate.
//!
//! Exposes `inner_main` so a workspace-level shim binary can call into the login controller.
//!
//! Provides commands to run the login controller headless, probe the backend once,
//! manage the language preference and open the auxiliary dialogs.
#![cfg_attr(
    test,
    expect(clippy::indexing_slicing, reason = "This is not problematic in tests",)
)]

extern crate alloc;
extern crate core;

pub mod app;
pub mod cli;
pub mod config;
pub mod run;
pub mod services;

use std::env;
use std::fs;
use std::io;
use std::sync::Once;

use eyre::{Result, WrapErr as _};
use tracing::{Instrument as _, info};
use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use cli::{Cli, Command, LogFormat};

static INIT_TRACING: Once = Once::new();
static INIT_RUSTLS: Once = Once::new();

/// Installs the process-wide rustls crypto provider used by the HTTP client.
///
/// # Panics
///
/// Panics if the OpenSSL crypto provider cannot be installed.
pub fn install_crypto_provider() {
    INIT_RUSTLS.call_once(|| {
        rustls_openssl::default_provider()
            .install_default()
            .expect("failed to install default rustls provider");
    });
}

fn init_tracing(log_format: LogFormat) {
    INIT_TRACING.call_once(move || {
        let default_level = if env::var("SCHOOLPORTAL_INTEGRATION_TEST").is_ok() {
            "error"
        } else {
            "info"
        };

        // Logs go to stderr, stdout is reserved for command output.
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_timer(ChronoLocal::rfc_3339())
            .with_writer(io::stderr);

        match log_format {
            LogFormat::Compact => builder.compact().init(),
            LogFormat::Json => builder.json().init(),
            LogFormat::Pretty => builder.pretty().init(),
        }
    });
}

/// The login controller's main function; can be called from a shim binary.
///
/// Parses CLI and dispatches to the selected command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a command fails,
/// or `probe` finds the district lookup service unavailable.
pub async fn inner_main(invocation: Cli) -> Result<()> {
    init_tracing(invocation.log_format);

    match invocation.command {
        Command::Run(args) => {
            let config_path = fs::canonicalize(&args.config)
                .wrap_err(format!("Config file not found at: {}", args.config))?;

            // Holds the resolved config path for the lifetime of the controller.
            let startup_span = tracing::info_span!("login.startup", ?config_path, pid=?std::process::id(), version = env!("CARGO_PKG_VERSION"));

            install_crypto_provider();

            async {
                info!("Starting login controller");
                run::run_controller(&config_path, &args).await
            }
            .instrument(startup_span)
            .await
        }
        Command::Probe(args) => {
            let config_path = fs::canonicalize(&args.config)
                .wrap_err(format!("Config file not found at: {}", args.config))?;
            install_crypto_provider();
            run::probe_once(&config_path, &args).await
        }
        Command::Language(args) => {
            let config_path = fs::canonicalize(&args.config)
                .wrap_err(format!("Config file not found at: {}", args.config))?;
            let language = run::resolve_language(&config_path, args.lang.as_deref()).await?;
            println!("{language}");
            Ok(())
        }
        Command::OpenDialog(args) => {
            run::open_dialog(args.kind);
            Ok(())
        }
    }
}
