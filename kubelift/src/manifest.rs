//! Local YAML manifest persistence for Deployment specifications.
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{Error, Result};

/// A directory of YAML manifest files.
///
/// Files written here are plain Kubernetes manifests keyed by file name.
/// Writing the same name twice silently overwrites the previous manifest;
/// nothing is ever deleted automatically.
#[derive(Clone, Debug)]
pub struct ManifestStore {
    root: PathBuf,
}

impl ManifestStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory manifests are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serialize `manifest` as YAML under `file_name` and return the
    /// absolute path of the written file.
    pub fn write(&self, file_name: &str, manifest: &Value) -> Result<PathBuf> {
        let path = self.root.join(file_name);
        let doc = serde_yaml::to_string(manifest).map_err(Error::SerializeManifest)?;
        fs::create_dir_all(&self.root).map_err(|source| Error::WriteManifest {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, doc).map_err(|source| Error::WriteManifest {
            path: path.clone(),
            source,
        })?;
        fs::canonicalize(&path).map_err(|source| Error::WriteManifest { path, source })
    }
}

/// Read a YAML manifest file into a mapping.
pub fn load(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let doc = fs::read_to_string(path).map_err(|source| Error::ReadManifest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&doc).map_err(|source| Error::ParseManifest {
        path: path.to_path_buf(),
        source,
    })
}
