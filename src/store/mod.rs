//! Flat-file vector store.
//!
//! Two artifacts per store: a raw binary array of little-endian f16 values
//! with shape `[num_products, embedding_dim]`, and a JSON manifest mapping
//! row position to `product_id` plus the text-blob fingerprint that row was
//! computed from. Rows are read back in exactly the order they were
//! written. Both files are committed atomically (temp + rename) so an
//! aborted run leaves the previous store intact.

pub mod error;


pub use error::{StoreError, StoreResult};

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use half::f16;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name of the raw vector array.
pub const VECTORS_FILE: &str = "vectors.f16";

/// File name of the row manifest.
pub const MANIFEST_FILE: &str = "vectors.manifest.json";

const TEMP_SUFFIX: &str = ".tmp";

/// One manifest row; position in `rows` equals row position in the array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowEntry {
    pub product_id: String,
    /// BLAKE3 hex fingerprint of the text blob the vector was computed from.
    pub text_hash: String,
}

/// Manifest persisted next to the vector array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreManifest {
    pub model_version: String,
    pub embedding_dim: usize,
    pub created_at: DateTime<Utc>,
    pub rows: Vec<RowEntry>,
}

/// Accumulates rows for a new store generation, then commits atomically.
pub struct VectorStoreBuilder {
    model_version: String,
    embedding_dim: usize,
    rows: Vec<RowEntry>,
    seen: HashSet<String>,
    data: Vec<f16>,
}

impl VectorStoreBuilder {
    pub fn new(model_version: String, embedding_dim: usize) -> Self {
        Self {
            model_version,
            embedding_dim,
            rows: Vec::new(),
            seen: HashSet::new(),
            data: Vec::new(),
        }
    }

    /// Appends one `(product_id, vector)` row.
    pub fn push(
        &mut self,
        product_id: String,
        text_hash: String,
        vector: &[f16],
    ) -> StoreResult<()> {
        if vector.len() != self.embedding_dim {
            return Err(StoreError::DimensionMismatch {
                product_id,
                expected: self.embedding_dim,
                actual: vector.len(),
            });
        }
        if !self.seen.insert(product_id.clone()) {
            return Err(StoreError::DuplicateProduct { product_id });
        }

        self.rows.push(RowEntry {
            product_id,
            text_hash,
        });
        self.data.extend_from_slice(vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes both store files under `dir` as a complete atomic replacement
    /// of any previous generation, then reopens the committed store.
    pub fn commit(self, dir: &Path) -> StoreResult<VectorStore> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let vectors_path = dir.join(VECTORS_FILE);
        let manifest_path = dir.join(MANIFEST_FILE);

        let manifest = StoreManifest {
            model_version: self.model_version,
            embedding_dim: self.embedding_dim,
            created_at: Utc::now(),
            rows: self.rows,
        };

        write_atomic(&vectors_path, bytemuck::cast_slice(&self.data))?;

        let manifest_bytes =
            serde_json::to_vec_pretty(&manifest).map_err(|e| StoreError::CorruptManifest {
                reason: e.to_string(),
            })?;
        write_atomic(&manifest_path, &manifest_bytes)?;

        debug!(
            dir = %dir.display(),
            rows = manifest.rows.len(),
            "Vector store committed"
        );

        VectorStore::open(dir)
    }
}

/// Read-only view of a committed vector store.
///
/// The array file is memory-mapped; vectors borrow from the mapping.
pub struct VectorStore {
    dir: PathBuf,
    manifest: StoreManifest,
    // None when the store has zero rows (an empty file cannot be mapped).
    data: Option<Mmap>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("dir", &self.dir)
            .field("model_version", &self.manifest.model_version)
            .field("embedding_dim", &self.manifest.embedding_dim)
            .field("rows", &self.manifest.rows.len())
            .finish()
    }
}

impl VectorStore {
    /// Opens the store committed under `dir`.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let vectors_path = dir.join(VECTORS_FILE);

        if !manifest_path.exists() {
            return Err(StoreError::NotFound {
                dir: dir.to_path_buf(),
            });
        }

        let manifest_bytes = fs::read(&manifest_path).map_err(|source| StoreError::Io {
            path: manifest_path,
            source,
        })?;
        let manifest: StoreManifest =
            serde_json::from_slice(&manifest_bytes).map_err(|e| StoreError::CorruptManifest {
                reason: e.to_string(),
            })?;

        let file = File::open(&vectors_path).map_err(|source| StoreError::Io {
            path: vectors_path.clone(),
            source,
        })?;
        let file_len = file
            .metadata()
            .map_err(|source| StoreError::Io {
                path: vectors_path.clone(),
                source,
            })?
            .len() as usize;

        let expected = manifest.rows.len() * manifest.embedding_dim * size_of::<f16>();
        if file_len != expected {
            return Err(StoreError::SizeMismatch {
                expected,
                actual: file_len,
                rows: manifest.rows.len(),
            });
        }

        let data = if expected == 0 {
            None
        } else {
            // SAFETY: the store is a committed snapshot; writers replace it
            // via rename rather than mutating the mapped file in place.
            Some(unsafe {
                Mmap::map(&file).map_err(|source| StoreError::Io {
                    path: vectors_path,
                    source,
                })?
            })
        };

        let index = manifest
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.product_id.clone(), i))
            .collect();

        Ok(Self {
            dir: dir.to_path_buf(),
            manifest,
            data,
            index,
        })
    }

    /// Opens the store if one has been committed under `dir`.
    pub fn open_if_exists(dir: &Path) -> StoreResult<Option<Self>> {
        if dir.join(MANIFEST_FILE).exists() {
            Ok(Some(Self::open(dir)?))
        } else {
            Ok(None)
        }
    }

    pub fn len(&self) -> usize {
        self.manifest.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.rows.is_empty()
    }

    pub fn embedding_dim(&self) -> usize {
        self.manifest.embedding_dim
    }

    pub fn model_version(&self) -> &str {
        &self.manifest.model_version
    }

    /// The vector for `product_id`, if one was stored.
    pub fn vector(&self, product_id: &str) -> Option<&[f16]> {
        self.row_vector(*self.index.get(product_id)?)
    }

    /// The text-blob fingerprint recorded for `product_id`.
    pub fn fingerprint(&self, product_id: &str) -> Option<&str> {
        let row = *self.index.get(product_id)?;
        Some(self.manifest.rows[row].text_hash.as_str())
    }

    /// Product ids in stored row order.
    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.manifest.rows.iter().map(|row| row.product_id.as_str())
    }

    fn row_vector(&self, row: usize) -> Option<&[f16]> {
        let data = self.data.as_deref()?;
        let stride = self.manifest.embedding_dim * size_of::<f16>();
        let bytes = data.get(row * stride..(row + 1) * stride)?;
        bytemuck::try_cast_slice(bytes).ok()
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let temp_path = temp_path_for(path);

    {
        let mut file = File::create(&temp_path).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(bytes).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        file.sync_all().map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
    }

    fs::rename(&temp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
