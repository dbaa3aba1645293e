//! Native messaging host manifests.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// `<name>.json` in a native messaging hosts directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Host executable. Relative paths are taken from the manifest's directory.
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_extensions: Vec<String>,
}

impl HostManifest {
    /// Read and check `<dir>/<name>.json`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, ManifestError> {
        let file = dir.join(format!("{}.json", name));
        if !file.exists() {
            return Err(ManifestError::NotFound(file));
        }

        let content = std::fs::read_to_string(&file)?;
        let mut manifest: HostManifest = serde_json::from_str(&content)?;

        if manifest.name != name {
            return Err(ManifestError::NameMismatch {
                expected: name.to_string(),
                found: manifest.name,
            });
        }
        if manifest.kind != "stdio" {
            return Err(ManifestError::UnsupportedType(manifest.kind));
        }
        if manifest.path.is_relative() {
            manifest.path = dir.join(&manifest.path);
        }
        Ok(manifest)
    }
}

/// Per-user native messaging hosts directory.
pub fn default_manifest_dir() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    if cfg!(target_os = "macos") {
        Some(home.join("Library/Application Support/Mozilla/NativeMessagingHosts"))
    } else if cfg!(target_os = "windows") {
        // Windows registers manifests through the registry.
        None
    } else {
        Some(home.join(".mozilla/native-messaging-hosts"))
    }
}

/// What to spawn for a host.
#[derive(Debug, Clone, PartialEq)]
pub struct HostLaunch {
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl HostLaunch {
    /// An explicit command, bypassing any manifest.
    pub fn command(name: impl Into<String>, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
        }
    }

    /// Resolve through the manifest in `dir`, or the per-user directory.
    pub fn from_manifest(name: &str, dir: Option<&Path>) -> Result<Self, ManifestError> {
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => default_manifest_dir().ok_or(ManifestError::NoManifestDir)?,
        };
        let manifest = HostManifest::load(&dir, name)?;
        tracing::debug!(
            name,
            path = %manifest.path.display(),
            "Resolved native host manifest"
        );
        Ok(Self {
            name: manifest.name,
            program: manifest.path,
            args: Vec::new(),
        })
    }
}
