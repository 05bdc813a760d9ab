//! Language preference persisted as a small JSON file.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use schoolportal_common::{LanguageCode, LanguageStore};

#[derive(Debug, Serialize, Deserialize)]
struct PersistedLanguage {
    language: LanguageCode,
}

#[derive(Debug, Clone)]
pub struct FileLanguageStore {
    path: PathBuf,
    default: LanguageCode,
}

impl FileLanguageStore {
    #[must_use]
    pub const fn new(path: PathBuf, default: LanguageCode) -> Self {
        Self { path, default }
    }

    fn read(&self) -> eyre::Result<Option<LanguageCode>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let persisted: PersistedLanguage = serde_json::from_str(&content)?;
        Ok(Some(persisted.language))
    }

    fn write(&self, language: &LanguageCode) -> eyre::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(&PersistedLanguage {
            language: language.clone(),
        })?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl LanguageStore for FileLanguageStore {
    fn get(&self) -> LanguageCode {
        match self.read() {
            Ok(Some(language)) => language,
            Ok(None) => {
                debug!(path = ?self.path, "No language preference stored yet, using default");
                self.default.clone()
            }
            Err(e) => {
                warn!(path = ?self.path, "Unreadable language preference, using default: {e}");
                self.default.clone()
            }
        }
    }

    fn set(&self, language: &LanguageCode) {
        if let Err(e) = self.write(language) {
            warn!(path = ?self.path, "Failed to persist language preference: {e}");
        }
    }
}
