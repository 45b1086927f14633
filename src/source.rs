use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::extract::DatasetKind;

/// Read-only access to raw GeoPackage bytes by dataset kind.
pub trait DatasetSource: Send + Sync {
    /// Fails with [`Error::DatasetUnavailable`] when the dataset cannot be supplied.
    fn fetch(&self, kind: DatasetKind) -> Result<Arc<[u8]>>;

    fn has(&self, kind: DatasetKind) -> bool;
}

/// Datasets stored as files in a directory, under their published names.
#[derive(Debug, Clone)]
pub struct DiskSource {
    root: PathBuf,
    overrides: HashMap<DatasetKind, PathBuf>,
}

impl DiskSource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into(), overrides: HashMap::new() } }

    /// Read `kind` from an explicit path instead of the directory.
    pub fn with_path(mut self, kind: DatasetKind, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(kind, path.into());
        self
    }

    pub fn path(&self, kind: DatasetKind) -> PathBuf {
        self.overrides.get(&kind).cloned().unwrap_or_else(|| self.root.join(kind.file_name()))
    }
}

impl DatasetSource for DiskSource {
    fn fetch(&self, kind: DatasetKind) -> Result<Arc<[u8]>> {
        let path = self.path(kind);
        std::fs::read(&path)
            .map(Arc::from)
            .map_err(|err| Error::DatasetUnavailable { kind, reason: format!("{}: {err}", path.display()) })
    }

    fn has(&self, kind: DatasetKind) -> bool { self.path(kind).is_file() }
}

/// Datasets held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemSource {
    files: HashMap<DatasetKind, Arc<[u8]>>,
}

impl MemSource {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, kind: DatasetKind, bytes: impl Into<Arc<[u8]>>) { self.files.insert(kind, bytes.into()); }
}

impl DatasetSource for MemSource {
    fn fetch(&self, kind: DatasetKind) -> Result<Arc<[u8]>> {
        self.files.get(&kind).cloned()
            .ok_or_else(|| Error::DatasetUnavailable { kind, reason: "not downloaded".into() })
    }

    fn has(&self, kind: DatasetKind) -> bool { self.files.contains_key(&kind) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_source_reports_missing() {
        let mut source = MemSource::new();
        source.insert(DatasetKind::Sign, vec![1u8, 2, 3]);
        assert!(source.has(DatasetKind::Sign));
        assert_eq!(&*source.fetch(DatasetKind::Sign).unwrap(), &[1, 2, 3]);
        assert!(matches!(
            source.fetch(DatasetKind::Restriction),
            Err(Error::DatasetUnavailable { kind: DatasetKind::Restriction, .. })
        ));
    }

    #[test]
    fn disk_source_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vesiliikennemerkit.gpkg"), b"bytes").unwrap();
        let source = DiskSource::new(dir.path()).with_path(DatasetKind::Restriction, dir.path().join("alueet.gpkg"));

        assert!(source.has(DatasetKind::Sign));
        assert_eq!(&*source.fetch(DatasetKind::Sign).unwrap(), b"bytes");
        assert!(!source.has(DatasetKind::Restriction));
        assert!(matches!(source.fetch(DatasetKind::Restriction), Err(Error::DatasetUnavailable { .. })));
    }
}
