use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;
use crate::error::{PosError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Indentation of the persisted document.
const INDENT: &[u8] = b"    ";

/// A persistent order collection stored as a pretty-printed JSON array.
///
/// The array is kept oldest-first. Writes go to a temporary file in the same
/// directory which then replaces the target with an atomic rename, so readers see
/// either the old collection or the new one and never a half-written file.
///
/// A missing file reads as an empty collection, as does a file holding only
/// whitespace. Anything else that fails to parse is reported as
/// `PosError::CorruptStore` on every load; history is never silently discarded.
#[derive(Debug, Clone)]
pub struct JsonFileOrderRepository {
    path: PathBuf,
}

impl JsonFileOrderRepository {
    /// Points the repository at `path`. Nothing is touched on disk until the first call.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty collection if the file does not exist yet.
    ///
    /// Returns `true` when a new file was created.
    pub fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.write_atomically(&[])?;
        Ok(true)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomically(&self, orders: &[Order]) -> Result<()> {
        let mut file = NamedTempFile::new_in(self.parent_dir())?;

        let mut serializer =
            serde_json::Serializer::with_formatter(&mut file, PrettyFormatter::with_indent(INDENT));
        orders.serialize(&mut serializer)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;

        file.persist(&self.path).map_err(|e| PosError::Io(e.error))?;
        Ok(())
    }

    fn read_orders(&self) -> Result<Vec<Order>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Order file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let orders: Vec<Order> =
            serde_json::from_str(&raw).map_err(|source| PosError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = orders.len(), "Loaded orders");
        Ok(orders)
    }
}

#[async_trait]
impl OrderRepository for JsonFileOrderRepository {
    async fn load(&self) -> Result<Vec<Order>> {
        let repository = self.clone();
        run_blocking(move || repository.read_orders()).await
    }

    async fn save(&self, orders: &[Order]) -> Result<()> {
        let repository = self.clone();
        let orders = orders.to_vec();
        let count = orders.len();
        run_blocking(move || repository.write_atomically(&orders)).await?;
        debug!(path = %self.path.display(), count, "Saved orders");
        Ok(())
    }
}

/// Runs file I/O on tokio's blocking pool so it never stalls a runtime worker.
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| PosError::Io(io::Error::other(e)))?
}
