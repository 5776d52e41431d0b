use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::core::auth::{AuthError, Credential, CredentialStore};

/// Keeps the user credential as a JSON file readable only by its owner.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "credential".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Credential, AuthError> {
        let text = fs::read_to_string(&self.path).await.map_err(|e| {
            AuthError::NotFound(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&text).map_err(|e| {
            AuthError::NotFound(format!("malformed credential in {}: {}", self.path.display(), e))
        })
    }

    async fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        info!(path = %self.path.display(), "Saving credential file");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Store(e.to_string()))?;
        }

        let text =
            serde_json::to_string_pretty(credential).map_err(|e| AuthError::Store(e.to_string()))?;

        // Written next to the target and renamed over it, so the secret never
        // lands in a file with wider permissions.
        let staging = self.staging_path();

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&staging)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        // `mode` only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&staging, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| AuthError::Store(e.to_string()))?;
        }

        file.write_all(text.as_bytes())
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        drop(file);

        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(())
    }
}
