use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::Error;

/// Durable key/value slot holding the serialized session record.
///
/// Modeled on browser `localStorage`: string keys, string values,
/// synchronous access. Implementations report failures; the
/// [`SessionStore`](super::SessionStore) decides to swallow them.
///
/// # Example
///
/// ```rust,ignore
/// impl SessionSlot for KeyringSlot {
///     fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
///         self.keyring.read(key)
///     }
///     fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
///         self.keyring.write(key, value)
///     }
///     fn remove_item(&self, key: &str) -> Result<(), Error> {
///         self.keyring.delete(key)
///     }
/// }
/// ```
pub trait SessionSlot: Send + Sync + 'static {
    /// Read the raw value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing whatever was there.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), Error>;
}

/// Process-local slot. Lost on restart.
#[derive(Debug, Default)]
pub struct MemorySlot {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionSlot for MemorySlot {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        self.items.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        self.items.lock().remove(key);
        Ok(())
    }
}

/// Directory-backed slot: one `<key>.json` file per key.
///
/// Writes go through a uniquely named temporary file in the same directory
/// that is then persisted over the target, so a reader never observes a
/// half-written value and concurrent writers never share a temp path.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, Error> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(Error::Storage(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid slot key `{key}`"),
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionSlot for FileSlot {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(value.as_bytes())?;
        file.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        match std::fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
