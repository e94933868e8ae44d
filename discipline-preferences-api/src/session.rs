use core::fmt::{self, Debug};
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt as _;
use tracing::debug;

use crate::error::Result;
use crate::models::LoginResponse;

/// The logged in user. This is the only thing remembered between runs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: None,
        }
    }

    /// `Ok(None)` when nobody is logged in.
    pub async fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match tokio::fs::read(path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no session at {}", path.display());
                return Ok(None);
            }
            Err(error) => return Err(error.into()),
        };
        let deserializer = &mut serde_json::Deserializer::from_slice(&contents);
        Ok(Some(serde_path_to_error::deserialize(deserializer)?))
    }

    /// Only the owner may read the file, it holds the bearer token.
    pub async fn store(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_vec(self)?;
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(path).await?;
        // mode only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await?;
        }
        file.write_all(&contents).await?;
        file.flush().await?;
        Ok(())
    }

    /// Removing a session that does not exist is fine.
    pub async fn clear(path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Err(error) if error.kind() != ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl From<LoginResponse> for Session {
    fn from(value: LoginResponse) -> Self {
        Self {
            user_id: value.user_id,
            token: value.token,
        }
    }
}
