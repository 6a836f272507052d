//! File-backed stores. Each store owns one JSON document under the data
//! directory and serializes its load -> mutate -> persist cycle behind a
//! per-store mutex. Documents are read-repaired on every load: missing
//! fields are defaulted, schema migrations applied, and the repaired form
//! is written back once if it differs from what was on disk. A missing or
//! unparsable file resets to the empty initial document; corruption is
//! never surfaced to callers.

pub mod attempt_store;
pub mod quiz_store;
pub mod temp_grid_store;
pub mod ticket_store;

pub use attempt_store::AttemptStore;
pub use quiz_store::QuizStore;
pub use temp_grid_store::TempGridStore;
pub use ticket_store::TicketStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

use crate::error::Result;

pub(crate) async fn load_document<T>(path: &Path, repair: impl FnOnce(&mut T)) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    let raw = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let mut doc = T::default();
            repair(&mut doc);
            persist_document(path, &doc).await?;
            return Ok(doc);
        }
        Err(err) => return Err(err.into()),
    };

    let on_disk: Option<Value> = serde_json::from_slice(&raw).ok();
    let mut doc: T = on_disk
        .as_ref()
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default();
    repair(&mut doc);

    let repaired = serde_json::to_value(&doc)?;
    if on_disk.as_ref() != Some(&repaired) {
        persist_document(path, &doc).await?;
    }

    Ok(doc)
}

pub(crate) async fn persist_document<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, serde_json::to_string_pretty(doc)?).await?;
    Ok(())
}
