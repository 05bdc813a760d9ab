//! Command implementations wiring the controller to its production adapters.

use alloc::sync::Arc;
use core::future::Future;
use std::path::Path;

use eyre::eyre;
use tokio::signal;
use tracing::info;

use schoolportal_common::{DialogKind, DistrictId, LanguageCode, RoleId};

use crate::{
    app::{
        self, Collaborators, LoginController, LoginSettings, PlatformSignal, RetryPolicy,
        SignalHub,
    },
    cli::ServiceArgs,
    config::{LoginConfig, load, resolve_config_relative_paths},
    services::{FileLanguageStore, FileSession, HttpDistrictLookup, LogDialogHost, LogPlatformHost},
};

/// Creates a future that resolves when a shutdown signal is received.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to create SIGTERM signal handler");
        tokio::select! {
            _ = sigterm.recv() => {}
            res = signal::ctrl_c() => drop(res),
        }
    }
    #[cfg(not(unix))]
    {
        drop(signal::ctrl_c().await);
    }
}

/// Forwards the OS "app came back" signal (SIGHUP) to `hub` until shutdown.
#[cfg_attr(
    not(unix),
    expect(unused_variables, reason = "There is no resume signal outside of unix")
)]
async fn forward_resume_signals(hub: &SignalHub) {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    #[cfg(unix)]
    {
        let mut sighup = signal::unix::signal(signal::unix::SignalKind::hangup())
            .expect("failed to create SIGHUP signal handler");
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = sighup.recv() => {
                    info!("Received SIGHUP, treating as app resume");
                    hub.emit(PlatformSignal::Resume);
                }
            }
        }
    }
    #[cfg(not(unix))]
    {
        shutdown.await;
    }
    info!("Received shutdown, shutting down");
}

fn language_store(config: &LoginConfig, config_path: &Path) -> FileLanguageStore {
    FileLanguageStore::new(
        resolve_config_relative_paths(config_path, &config.language.path),
        config.language.default.clone(),
    )
}

/// Applies the CLI overrides on top of the configured district and role.
fn settings(config: &LoginConfig, args: &ServiceArgs) -> eyre::Result<LoginSettings> {
    let district = match args.district {
        Some(ref district) => DistrictId::new(district.as_str())?,
        None => config.district.id.clone(),
    };
    let role = match args.role {
        Some(ref role) => RoleId::new(role.as_str())?,
        None => config.district.role.clone(),
    };
    Ok(LoginSettings {
        district,
        role,
        retry: RetryPolicy::from(&config.retry),
        web: config.platform.web,
        os: config.platform.os,
    })
}

fn build_controller(
    config: &LoginConfig,
    config_path: &Path,
    args: &ServiceArgs,
    hub: &SignalHub,
) -> eyre::Result<LoginController<HttpDistrictLookup>> {
    let collaborators = Collaborators {
        lookup: Arc::new(HttpDistrictLookup::new(&config.lookup)?),
        language: Arc::new(language_store(config, config_path)),
        session: Arc::new(FileSession::new(resolve_config_relative_paths(
            config_path,
            &config.session.path,
        ))),
        dialogs: Arc::new(LogDialogHost::default()),
        platform: Arc::new(LogPlatformHost),
        signals: Arc::new(hub.clone()),
    };
    Ok(LoginController::new(collaborators, settings(config, args)?))
}

/// Runs the controller until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the HTTP client cannot be built.
pub async fn run_controller(config_path: &Path, args: &ServiceArgs) -> eyre::Result<()> {
    let hub = SignalHub::new();
    run_controller_until(config_path, args, &hub, forward_resume_signals(&hub)).await
}

/// Runs the controller fed by `hub` until `shutdown` resolves, then tears it down.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the HTTP client cannot be built.
pub async fn run_controller_until<F>(
    config_path: &Path,
    args: &ServiceArgs,
    hub: &SignalHub,
    shutdown: F,
) -> eyre::Result<()>
where
    F: Future<Output = ()>,
{
    let config = load(config_path).await?;
    let mut controller = build_controller(&config, config_path, args, hub)?;

    controller.activate();
    controller.after_render();
    if !config.platform.web {
        // The headless shell is ready as soon as the page has rendered.
        hub.emit(PlatformSignal::DeviceReady);
    }

    shutdown.await;

    controller.teardown().await;
    Ok(())
}

/// Probes once, retrying per the configured budget.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the service stays unavailable.
pub async fn probe_once(config_path: &Path, args: &ServiceArgs) -> eyre::Result<()> {
    let config = load(config_path).await?;
    let hub = SignalHub::new();
    let mut controller = build_controller(&config, config_path, args, &hub)?;

    controller.activate();
    let status = match controller.prober() {
        Some(prober) => prober.settled().await,
        None => controller.status(),
    };
    controller.teardown().await;

    if status.is_available() {
        info!(attempt = status.attempt, "District lookup service is available");
        Ok(())
    } else {
        Err(eyre!(
            "District lookup service unavailable after {} attempt(s)",
            status.attempt
        ))
    }
}

/// Resolves and persists the display language, returning the active code.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub async fn resolve_language(
    config_path: &Path,
    requested: Option<&str>,
) -> eyre::Result<LanguageCode> {
    let config = load(config_path).await?;
    let store = language_store(&config, config_path);
    Ok(app::set_language(&store, requested))
}

pub fn open_dialog(kind: DialogKind) {
    app::open(&LogDialogHost::default(), kind);
}
