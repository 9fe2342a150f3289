//! Core store type and builder.

use crate::customer::Customer;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::persist::{atomic_write, overwrite, read_file};
use crate::projection::project;
use crate::serializer::{Decoded, JsonSerializer, Serializer};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// Where [`CustomerStore::open_default`] keeps its data, relative to the
/// working directory.
pub const DEFAULT_DATA_PATH: &str = "data/customers.json";

/// Customer registry backed by a single JSON array on disk.
///
/// The whole file is loaded once at construction. Reads are served from
/// memory; every modification appends to the in-memory list and rewrites the
/// whole file from the id-deduplicated projection of that list.
///
/// Nothing here fails observably: construction degrades to an empty (or
/// partial) registry and write errors are handed to the
/// [`DiagnosticSink`] instead of the caller. Use
/// [`try_modify_customer_info`](Self::try_modify_customer_info) or
/// [`flush`](Self::flush) when you need the error.
///
/// One lock guards the list. Modifications hold it exclusively across
/// append, projection and disk write; reads share it.
pub struct CustomerStore {
    records: RwLock<Vec<Customer>>,
    path: PathBuf,
    serializer: JsonSerializer,
    atomic: bool,
    sink: Box<dyn DiagnosticSink>,
}

impl CustomerStore {
    /// Open the registry at `path` with compact JSON, in-place writes and
    /// `tracing` diagnostics.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::builder(path).build()
    }

    /// Open the registry at [`DEFAULT_DATA_PATH`].
    pub fn open_default() -> Self {
        Self::open(DEFAULT_DATA_PATH)
    }

    /// Start configuring a new store. Call [`.build()`](CustomerStoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> CustomerStoreBuilder {
        CustomerStoreBuilder::new(path)
    }

    // ---- reads ----

    /// Copy of every record held in memory, in insertion order.
    ///
    /// This is the raw list: an id modified twice shows up twice. See
    /// [`persisted`](Self::persisted) for the deduplicated view.
    #[must_use]
    pub fn read_customer_info(&self) -> Vec<Customer> {
        self.records.read().clone()
    }

    /// The effective record for `id` (its latest modification), or `None`.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<Customer> {
        self.records
            .read()
            .iter()
            .rev()
            .find(|c| c.id == id)
            .cloned()
    }

    /// The records as they are written to disk: one per id, positioned by
    /// first appearance, carrying the latest values.
    #[must_use]
    pub fn persisted(&self) -> Vec<Customer> {
        project(&self.records.read())
    }

    /// Number of in-memory entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// `true` when nothing has been loaded or added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---- writes ----

    /// Insert or update `customer` and rewrite the data file.
    ///
    /// The record is always appended in memory. If the write fails the
    /// failure goes to the diagnostic sink and memory stays ahead of disk.
    pub fn modify_customer_info(&self, customer: Customer) {
        if let Err(error) = self.append_and_persist(customer) {
            self.sink.report(&Diagnostic::WriteFailure {
                path: self.path.clone(),
                error,
            });
        }
    }

    /// Like [`modify_customer_info`](Self::modify_customer_info) but returns
    /// the write error instead of reporting it. The in-memory append happens
    /// either way.
    pub fn try_modify_customer_info(&self, customer: Customer) -> Result<()> {
        self.append_and_persist(customer)
    }

    // ---- persistence ----

    /// Rewrite the data file from the current records.
    pub fn flush(&self) -> Result<()> {
        let records = self.records.write();
        self.write_projection(&records)
    }

    // ---- internal ----

    fn append_and_persist(&self, customer: Customer) -> Result<()> {
        let mut records = self.records.write();
        records.push(customer);
        self.write_projection(&records)
    }

    fn write_projection(&self, records: &[Customer]) -> Result<()> {
        let projected = project(records);
        let bytes = self.serializer.serialize(&projected)?;
        if self.atomic {
            atomic_write(&self.path, &bytes)?;
        } else {
            overwrite(&self.path, &bytes)?;
        }
        tracing::debug!(
            path = %self.path.display(),
            records = projected.len(),
            "customer data persisted"
        );
        Ok(())
    }
}

impl std::fmt::Debug for CustomerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerStore")
            .field("path", &self.path)
            .field("atomic", &self.atomic)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn load(path: &Path, serializer: &JsonSerializer, sink: &dyn DiagnosticSink) -> Vec<Customer> {
    let bytes = match read_file(path) {
        Ok(b) => b,
        Err(error) => {
            sink.report(&Diagnostic::ReadFailure {
                path: path.to_path_buf(),
                error,
            });
            return Vec::new();
        }
    };

    let Decoded { customers, error } = serializer.deserialize(&bytes);
    if let Some(error) = error {
        sink.report(&Diagnostic::ParseFailure {
            path: path.to_path_buf(),
            kept: customers.len(),
            error,
        });
    }
    tracing::debug!(
        path = %path.display(),
        records = customers.len(),
        "customer data loaded"
    );
    customers
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`CustomerStore`].
///
/// ```rust,no_run
/// use customer_store::CustomerStore;
///
/// let store = CustomerStore::builder("customers.json")
///     .pretty(true)
///     .atomic(true)
///     .sink(|d: &customer_store::Diagnostic| eprintln!("{d}"))
///     .build();
/// ```
pub struct CustomerStoreBuilder {
    path: PathBuf,
    pretty: bool,
    atomic: bool,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl CustomerStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: false,
            atomic: false,
            sink: None,
        }
    }

    /// Write human-readable JSON with indentation (default: compact).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Replace the file via temp file + rename instead of truncating it in
    /// place (default: in place).
    pub fn atomic(mut self, yes: bool) -> Self {
        self.atomic = yes;
        self
    }

    /// Where absorbed failures go (default: [`TracingSink`]).
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Load whatever the file holds and return the store. Never fails.
    pub fn build(self) -> CustomerStore {
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };
        let sink: Box<dyn DiagnosticSink> = match self.sink {
            Some(sink) => sink,
            None => Box::new(TracingSink),
        };

        let records = load(&self.path, &serializer, sink.as_ref());

        CustomerStore {
            records: RwLock::new(records),
            path: self.path,
            serializer,
            atomic: self.atomic,
            sink,
        }
    }
}

impl std::fmt::Debug for CustomerStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerStoreBuilder")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .field("atomic", &self.atomic)
            .field("custom_sink", &self.sink.is_some())
            .finish()
    }
}
