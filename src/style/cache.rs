// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Stores for generated documents.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StyleError;

/// A key-value store for generated documents.
pub trait PreferenceCache {
    /// Returns the cached document, if any.
    fn get(&self, name: &str) -> Option<String>;

    /// Replaces the cached document.
    fn set(&mut self, name: &str, contents: &str) -> Result<(), StyleError>;
}

/// A cache held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    documents: HashMap<String, String>,
    sets: usize,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`PreferenceCache::set`] was called.
    pub fn set_count(&self) -> usize {
        self.sets
    }
}

impl PreferenceCache for MemoryCache {
    fn get(&self, name: &str) -> Option<String> {
        self.documents.get(name).cloned()
    }

    fn set(&mut self, name: &str, contents: &str) -> Result<(), StyleError> {
        self.sets += 1;
        self.documents.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

/// A cache storing each document as a file in one directory.
#[derive(Debug, Clone)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    /// Creates a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory documents are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path a document is stored at.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_of(name), contents)
    }
}

impl PreferenceCache for DirCache {
    fn get(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path_of(name)).ok()
    }

    fn set(&mut self, name: &str, contents: &str) -> Result<(), StyleError> {
        self.write(name, contents).map_err(|source| StyleError::Cache {
            name: name.to_string(),
            dir: self.dir.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_cache() {
        let mut cache = MemoryCache::new();
        assert_eq!(cache.get("doc"), None);
        cache.set("doc", "contents").unwrap();
        assert_eq!(cache.get("doc").as_deref(), Some("contents"));
        assert_eq!(cache.set_count(), 1);
    }

    #[test]
    fn test_dir_cache_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let mut cache = DirCache::new(temp.path().join("Haxe"));

        assert_eq!(cache.get("doc"), None);
        cache.set("doc", "<plist/>").unwrap();
        assert_eq!(cache.get("doc").as_deref(), Some("<plist/>"));
        assert!(cache.path_of("doc").is_file());
    }

    #[test]
    fn test_dir_cache_reports_failures() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "").unwrap();

        let mut cache = DirCache::new(&blocker);
        let err = cache.set("doc", "x").unwrap_err();
        assert!(matches!(err, StyleError::Cache { ref name, .. } if name == "doc"));
    }
}
