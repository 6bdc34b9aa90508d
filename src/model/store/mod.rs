//! The document store backing the registry.
//!
//! A deliberately small stand-in for a real database: everything is held
//! in memory behind one lock and optionally mirrored to a JSON file. The
//! rest of the crate only sees [`Store`] and [`Transaction`], so swapping
//! in a real database later means replacing this module alone.

use std::{
    fs, io,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

mod data;
mod errors;

pub use data::{Document, StoreData};
pub use errors::StoreError;

/// The backing store: the whole dataset behind a single lock, optionally
/// mirrored to a JSON file.
///
/// Writers mutate a draft copy obtained from [`Store::write`], which only
/// becomes visible to readers when the transaction commits. Readers
/// therefore never observe a half-applied update, and an abandoned write
/// leaves no trace.
#[derive(Debug)]
pub struct Store {
    data: RwLock<StoreData>,
    path: Option<PathBuf>,
}

impl Store {
    /// A store with no backing file; contents live and die with the
    /// process.
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            path: None,
        }
    }

    /// A store mirrored to the JSON document at `path`, loading any
    /// existing contents. A missing file is an empty store, not an error.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let data = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => StoreData::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            data: RwLock::new(data),
            path: Some(path),
        })
    }

    /// Lock the data for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        // A poisoned lock is still consistent: a panicking writer only
        // ever touched its draft, never the shared data.
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a transaction against a draft of the current data.
    pub fn write(&self) -> Transaction<'_> {
        let guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let draft = guard.clone();
        Transaction {
            guard,
            draft,
            path: self.path.as_deref(),
        }
    }
}

/// An exclusive draft of the store contents. Dropping the transaction
/// without calling [`Transaction::commit`] discards every change.
pub struct Transaction<'s> {
    guard: RwLockWriteGuard<'s, StoreData>,
    draft: StoreData,
    path: Option<&'s Path>,
}

impl Transaction<'_> {
    /// Persist the draft and make it visible to readers. The file is
    /// written before the in-memory swap, so an i/o failure leaves the
    /// shared data untouched.
    pub fn commit(self) -> Result<(), StoreError> {
        let Transaction {
            mut guard,
            draft,
            path,
        } = self;
        if let Some(path) = path {
            persist(path, &draft)?;
        }
        *guard = draft;
        Ok(())
    }
}

impl Deref for Transaction<'_> {
    type Target = StoreData;

    fn deref(&self) -> &Self::Target {
        &self.draft
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.draft
    }
}

/// Write the document to a sibling temporary file, then move it into
/// place so the file on disk is never truncated mid-write.
fn persist(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(data)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
