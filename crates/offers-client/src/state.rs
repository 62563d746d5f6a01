//! Persisted client configuration and credentials
//!
//! One JSON file holds everything needed to reconstruct a working client:
//! the long-lived refresh token, the currently held access token with its
//! expiry, the transport discriminator, and the logging settings. Writes
//! use atomic temp-file + rename to prevent corruption on crash.
//!
//! The file contains live credentials in plain structured text. That is a
//! deliberate trade-off: the SDK is driven by repeated short CLI
//! invocations that must share a token between runs. The exposure is
//! limited the same way as any credential file, with atomic writes and
//! 0600 permissions (owner read/write only).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use offers_transport::TransportKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Production endpoint of the Offers API.
pub const DEFAULT_BASE_URL: &str = "https://python.exercise.applifting.cz";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Full client configuration as stored on disk.
///
/// Invariant: `access_token` and `access_token_expiry` are either both
/// present or both absent. [`ClientState::load`] rejects files that violate
/// it rather than guessing which half to trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Absolute expiry of the held access token, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_expiry: Option<DateTime<Utc>>,
    pub transport: TransportKind,
    #[serde(default)]
    pub logging: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl ClientState {
    /// State for a fresh client: refresh token only, no held access token,
    /// logging off.
    pub fn new(refresh_token: impl Into<String>, transport: TransportKind) -> Self {
        Self {
            base_url: default_base_url(),
            refresh_token: refresh_token.into(),
            access_token: None,
            access_token_expiry: None,
            transport,
            logging: false,
            log_dir: default_log_dir(),
        }
    }

    /// Load client state from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Io(format!("reading client state file: {e}")))?;
        let state: ClientState = serde_json::from_str(&contents)
            .map_err(|e| Error::StateParse(format!("parsing client state file: {e}")))?;
        state.validate()?;
        info!(
            path = %path.display(),
            transport = %state.transport,
            has_access_token = state.access_token.is_some(),
            "loaded client state"
        );
        Ok(state)
    }

    /// Persist the state to a JSON file.
    ///
    /// Uses atomic write (temp file + rename). File permissions are set to
    /// 0600 since the file contains the refresh and access tokens.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::StateParse(format!("serializing client state: {e}")))?;

        let dir = path
            .parent()
            .ok_or_else(|| Error::Io("client state path has no parent directory".into()))?;
        let tmp_path = dir.join(format!(".client-state.tmp.{}", std::process::id()));

        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(|e| Error::Io(format!("writing temp state file: {e}")))?;

        // Set 0600 permissions (unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&tmp_path, perms)
                .await
                .map_err(|e| Error::Io(format!("setting state file permissions: {e}")))?;
        }

        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| Error::Io(format!("renaming temp state file: {e}")))?;

        debug!(path = %path.display(), "persisted client state");
        Ok(())
    }

    /// Enforce the token/expiry pairing invariant.
    fn validate(&self) -> Result<()> {
        match (&self.access_token, &self.access_token_expiry) {
            (Some(_), None) => Err(Error::StateParse(
                "access_token present without access_token_expiry".into(),
            )),
            (None, Some(_)) => Err(Error::StateParse(
                "access_token_expiry present without access_token".into(),
            )),
            _ => Ok(()),
        }
    }
}
