//! Headless stand-ins for the UI host: dialogs become JSON lines on stdout,
//! platform styling becomes a log event.

use core::sync::atomic::{AtomicU64, Ordering};
use std::io::{self, Write as _};

use tracing::{info, warn};

use schoolportal_common::{DialogHandle, DialogHost, DialogRequest, PlatformHost, StatusBarStyle};

#[derive(Debug, Default)]
pub struct LogDialogHost {
    next_handle: AtomicU64,
}

impl DialogHost for LogDialogHost {
    fn open(&self, request: DialogRequest) -> DialogHandle {
        let handle = DialogHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        info!(dialog = %request.kind, handle = handle.0, "Opening dialog");
        match serde_json::to_string(&request) {
            Ok(line) => {
                if let Err(e) = writeln!(io::stdout().lock(), "{line}") {
                    warn!("Failed to write dialog request: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize dialog request: {e}"),
        }
        handle
    }
}

#[derive(Debug, Default)]
pub struct LogPlatformHost;

impl PlatformHost for LogPlatformHost {
    fn style_status_bar(&self, style: StatusBarStyle) {
        info!(?style, "Styling native status bar");
    }
}
