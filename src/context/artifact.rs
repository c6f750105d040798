// ABOUTME: Artifact store - named, versioned binary blobs with a MIME type.
// ABOUTME: In-memory and file-backed implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ContextError;

const TEXT_MIME: &str = "text/plain";
const DEFAULT_MIME: &str = "application/octet-stream";

/// A blob of bytes tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Artifact {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// A `text/plain` artifact.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(TEXT_MIME, content.into().into_bytes())
    }

    /// The bytes as UTF-8, if they are valid.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// An artifact together with the version it was loaded at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVersion {
    pub version: u64,
    pub artifact: Artifact,
}

/// Versioned artifact storage.
///
/// Versions start at 0 and grow by one per save. A missing name or version
/// is `Ok(None)`.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Names of all stored artifacts, sorted.
    async fn list(&self) -> Result<Vec<String>, ContextError>;

    /// The latest version of an artifact.
    async fn load(&self, name: &str) -> Result<Option<ArtifactVersion>, ContextError>;

    async fn load_version(
        &self,
        name: &str,
        version: u64,
    ) -> Result<Option<ArtifactVersion>, ContextError>;

    /// Every stored version number, ascending.
    async fn versions(&self, name: &str) -> Result<Vec<u64>, ContextError>;

    /// Store a new version and return its number.
    async fn save(&self, name: &str, artifact: Artifact) -> Result<u64, ContextError>;
}

fn check_name(name: &str) -> Result<(), ContextError> {
    if name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(ContextError::InvalidArtifactName(name.to_string()));
    }
    Ok(())
}

/// Artifacts kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryArtifacts {
    artifacts: Arc<RwLock<BTreeMap<String, Vec<Artifact>>>>,
}

impl InMemoryArtifacts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifacts {
    async fn list(&self) -> Result<Vec<String>, ContextError> {
        Ok(self.artifacts.read().await.keys().cloned().collect())
    }

    async fn load(&self, name: &str) -> Result<Option<ArtifactVersion>, ContextError> {
        let artifacts = self.artifacts.read().await;
        Ok(artifacts.get(name).and_then(|versions| {
            versions.last().map(|artifact| ArtifactVersion {
                version: (versions.len() - 1) as u64,
                artifact: artifact.clone(),
            })
        }))
    }

    async fn load_version(
        &self,
        name: &str,
        version: u64,
    ) -> Result<Option<ArtifactVersion>, ContextError> {
        let artifacts = self.artifacts.read().await;
        Ok(artifacts
            .get(name)
            .and_then(|versions| versions.get(version as usize))
            .map(|artifact| ArtifactVersion {
                version,
                artifact: artifact.clone(),
            }))
    }

    async fn versions(&self, name: &str) -> Result<Vec<u64>, ContextError> {
        let artifacts = self.artifacts.read().await;
        Ok(artifacts
            .get(name)
            .map(|versions| (0..versions.len() as u64).collect())
            .unwrap_or_default())
    }

    async fn save(&self, name: &str, artifact: Artifact) -> Result<u64, ContextError> {
        check_name(name)?;
        let mut artifacts = self.artifacts.write().await;
        let versions = artifacts.entry(name.to_string()).or_default();
        versions.push(artifact);
        Ok((versions.len() - 1) as u64)
    }
}

/// Artifacts stored on disk.
///
/// Layout: `<root>/<name>/<version>.bin` with the MIME type in
/// `<root>/<name>/<version>.mime`.
#[derive(Debug, Clone)]
pub struct FileArtifacts {
    root: PathBuf,
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl FileArtifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, name: &str) -> Result<PathBuf, ContextError> {
        check_name(name)?;
        Ok(self.root.join(name))
    }

    async fn read_version(
        &self,
        dir: &Path,
        version: u64,
    ) -> Result<Option<ArtifactVersion>, ContextError> {
        let data = match tokio::fs::read(dir.join(format!("{version}.bin"))).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mime_type = match tokio::fs::read_to_string(dir.join(format!("{version}.mime"))).await
        {
            Ok(m) => m.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DEFAULT_MIME.to_string(),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(ArtifactVersion {
            version,
            artifact: Artifact { mime_type, data },
        }))
    }
}

#[async_trait]
impl ArtifactStore for FileArtifacts {
    async fn list(&self) -> Result<Vec<String>, ContextError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn load(&self, name: &str) -> Result<Option<ArtifactVersion>, ContextError> {
        let dir = self.dir(name)?;
        match self.versions(name).await?.last() {
            Some(&latest) => self.read_version(&dir, latest).await,
            None => Ok(None),
        }
    }

    async fn load_version(
        &self,
        name: &str,
        version: u64,
    ) -> Result<Option<ArtifactVersion>, ContextError> {
        let dir = self.dir(name)?;
        self.read_version(&dir, version).await
    }

    async fn versions(&self, name: &str) -> Result<Vec<u64>, ContextError> {
        let dir = self.dir(name)?;
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut versions = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(v) = file_name
                .strip_suffix(".bin")
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                versions.push(v);
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    async fn save(&self, name: &str, artifact: Artifact) -> Result<u64, ContextError> {
        let dir = self.dir(name)?;
        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&dir).await?;
        let version = match self.versions(name).await?.last() {
            Some(latest) => latest + 1,
            None => 0,
        };
        tokio::fs::write(dir.join(format!("{version}.mime")), &artifact.mime_type).await?;
        tokio::fs::write(dir.join(format!("{version}.bin")), &artifact.data).await?;
        Ok(version)
    }
}
