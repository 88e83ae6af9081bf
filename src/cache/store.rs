use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::error::{CacheError, CacheResult};
use super::key::CacheKey;

/// Write-through store of normalized text → embedding vector.
///
/// Not safe for concurrent writers across processes: the last flush wins. Within one
/// process all mutation goes through `&mut self`, which serializes writers.
pub struct EmbeddingCache {
    entries: HashMap<CacheKey, Vec<f32>>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for EmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingCache")
            .field("entries", &self.entries.len())
            .field("path", &self.path)
            .finish()
    }
}

impl EmbeddingCache {
    /// Opens the cache persisted at `path`, or starts empty if nothing exists there yet.
    ///
    /// An existing file that cannot be read or parsed is an error: the cache is not
    /// trusted to tell valid entries from corruption.
    pub fn open(path: impl Into<PathBuf>) -> CacheResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            Self::load(&path)?
        } else {
            info!(path = %path.display(), "No embedding cache found, starting empty");
            HashMap::new()
        };

        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// Creates a cache with no backing file (nothing is persisted).
    pub fn in_memory() -> Self {
        Self {
            entries: HashMap::new(),
            path: None,
        }
    }

    fn load(path: &Path) -> CacheResult<HashMap<CacheKey, Vec<f32>>> {
        let bytes = fs::read(path).map_err(|source| CacheError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: BTreeMap<String, Vec<f32>> =
            serde_json::from_slice(&bytes).map_err(|source| CacheError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let mut entries = HashMap::with_capacity(raw.len());
        let mut rekeyed = 0usize;
        for (text, vector) in raw {
            let key = CacheKey::from_text(&text);
            if key.as_str() != text {
                rekeyed += 1;
            }
            entries.insert(key, vector);
        }

        if rekeyed > 0 {
            warn!(
                path = %path.display(),
                rekeyed,
                "Re-normalized persisted cache keys"
            );
        }

        info!(
            path = %path.display(),
            entries = entries.len(),
            "Loaded embedding cache"
        );

        Ok(entries)
    }

    /// Looks up a vector by key. Does not mutate.
    #[inline]
    pub fn get(&self, key: &CacheKey) -> Option<&[f32]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns `true` if the cache holds `key`.
    #[inline]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites `key`, then flushes the full mapping to storage.
    ///
    /// On a flush error the entry stays in memory.
    pub fn put(&mut self, key: CacheKey, value: Vec<f32>) -> CacheResult<()> {
        self.entries.insert(key, value);
        self.flush()
    }

    /// Rewrites the backing file with the full mapping (no-op for in-memory caches).
    ///
    /// Writes to a temp file in the same directory, syncs it, then renames over the
    /// target, so readers never observe a torn file.
    pub fn flush(&self) -> CacheResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let persist_err = |source: std::io::Error| CacheError::Persist {
            path: path.clone(),
            source,
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(persist_err)?;

        let sorted: BTreeMap<&str, &Vec<f32>> = self
            .entries
            .iter()
            .map(|(key, vector)| (key.as_str(), vector))
            .collect();

        let mut temp = NamedTempFile::new_in(dir).map_err(persist_err)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer(&mut writer, &sorted)?;
            writer.flush().map_err(persist_err)?;
        }
        temp.as_file().sync_all().map_err(persist_err)?;
        temp.persist(path).map_err(|e| persist_err(e.error))?;

        debug!(
            path = %path.display(),
            entries = self.entries.len(),
            "Flushed embedding cache"
        );

        Ok(())
    }

    /// Returns the number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the backing file, if any.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
