//! Generic JSON-backed record collection, plus its builder.

use crate::document::DocumentStore;
use crate::error::{Error, Result};
use crate::serializer::JsonSerializer;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::info;

/// A record that can live in a [`Collection`]: serializable, cloneable, and
/// identified by a store-assigned integer id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable kind, used in errors and logs.
    const KIND: &'static str;

    /// Store-assigned id of this record.
    fn id(&self) -> u64;
}

/// Ordered, file-backed sequence of records.
///
/// The in-memory vector is the working copy; the file is its durable form.
/// Every mutation runs under the write lock from start to finish: it works on a
/// copy of the current records, persists the copy, and only then publishes it.
/// A failed mutation (validation or I/O) leaves both memory and disk as they
/// were.
pub struct Collection<T> {
    records: RwLock<Vec<T>>,
    document: DocumentStore,
}

impl<T: Record> Collection<T> {
    /// Load the collection at `path` with default settings (pretty JSON).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring a collection. Call [`.build()`](CollectionBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> CollectionBuilder<T> {
        CollectionBuilder::new(path)
    }

    // ---- reads ----

    /// Snapshot of every record, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.records.read().clone()
    }

    /// Run `f` against the current records under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.records.read())
    }

    /// First record matching `pred`, cloned.
    #[must_use]
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.records.read().iter().find(|r| pred(*r)).cloned()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// `true` when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id the next created record would receive.
    pub fn next_id(&self) -> Result<u64> {
        next_id(self.records.read().as_slice())
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.document.path()
    }

    // ---- writes ----

    /// Apply `f` to a copy of the records, persist the result, then publish it.
    ///
    /// Mutations on one collection never interleave. If `f` or the save fails,
    /// nothing changes.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R>) -> Result<R> {
        let mut guard = self.records.write();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.document.save(next.as_slice())?;
        *guard = next;
        Ok(out)
    }

    /// Write the current records to disk as they are.
    pub fn flush(&self) -> Result<()> {
        let guard = self.records.write();
        self.document.save(guard.as_slice())
    }
}

impl<T> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("path", &self.document.path())
            .field("len", &self.records.read().len())
            .finish_non_exhaustive()
    }
}

/// `1` for an empty slice, otherwise one past the largest id present. Gaps left
/// by deletions are never filled.
pub fn next_id<T: Record>(records: &[T]) -> Result<u64> {
    match records.iter().map(Record::id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| Error::Validation(format!("{} id space exhausted", T::KIND))),
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and loads a [`Collection`].
///
/// ```rust,no_run
/// use json_shop::{Collection, Product};
///
/// let products = Collection::<Product>::builder("products.json")
///     .pretty(false)
///     .build()
///     .unwrap();
/// ```
pub struct CollectionBuilder<T> {
    path: PathBuf,
    pretty: bool,
    _marker: PhantomData<T>,
}

impl<T: Record> CollectionBuilder<T> {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
            _marker: PhantomData,
        }
    }

    /// Write indented JSON (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Load the records from disk and return the ready collection. The load
    /// happens exactly once, here; nothing can reach the collection before it
    /// finishes.
    pub fn build(self) -> Result<Collection<T>> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Config(format!("{} path must not be empty", T::KIND)));
        }
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };
        let document = DocumentStore::new(&self.path, serializer);
        let records: Vec<T> = document.load();
        info!(
            kind = T::KIND,
            path = %self.path.display(),
            count = records.len(),
            "collection loaded"
        );

        Ok(Collection {
            records: RwLock::new(records),
            document,
        })
    }
}

impl<T> std::fmt::Debug for CollectionBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionBuilder")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .finish()
    }
}
