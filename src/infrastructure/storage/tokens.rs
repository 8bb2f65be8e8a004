//! Session token stores

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::application::TokenStore;
use crate::domain::{Credential, DomainError, DomainResult};
use crate::infrastructure::InfraError;

/// Token kept in a file between CLI runs
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> DomainResult<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(InfraError::from)?;
        Ok(Credential::new(raw))
    }

    fn save(&self, credential: &Credential) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(InfraError::from)?;

        // mode only applies on creation; an older file is narrowed before the write
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(InfraError::from)?;
        }
        file.write_all(credential.secret().as_bytes())
            .map_err(InfraError::from)?;

        debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    fn clear(&self) -> DomainResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }
}

/// Process-local token store for tests and demo runs
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryTokenStore {
    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, Option<Credential>>> {
        self.slot
            .lock()
            .map_err(|_| DomainError::Storage("token store poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> DomainResult<Option<Credential>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, credential: &Credential) -> DomainResult<()> {
        *self.lock()? = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> DomainResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}
