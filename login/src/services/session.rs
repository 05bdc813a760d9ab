use std::{fs, io, path::PathBuf};

use tracing::{debug, info, warn};

use schoolportal_common::SessionService;

/// Session persisted as a marker file; ending the session removes it.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionService for FileSession {
    fn end_session(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => info!(path = ?self.path, "Ended previous session"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No previous session to end");
            }
            Err(e) => warn!(path = ?self.path, "Failed to end previous session: {e}"),
        }
    }
}
