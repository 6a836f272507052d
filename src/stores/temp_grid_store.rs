use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use super::persist_document;
use crate::error::Result;
use crate::models::temp_grid::{TempGridBlock, TEMP_GRID_TOTAL};

#[derive(Debug, Serialize, Deserialize)]
struct TempGridDocument {
    blocks: Vec<TempGridBlock>,
}

impl Default for TempGridDocument {
    fn default() -> Self {
        Self {
            blocks: vec![TempGridBlock::default(); TEMP_GRID_TOTAL],
        }
    }
}

/// Coerces arbitrary JSON into exactly `TEMP_GRID_TOTAL` cells: extra
/// items are dropped, missing ones default, and each field is kept only
/// when it is already a string (trimmed).
fn normalize_blocks(input: &Value) -> Vec<TempGridBlock> {
    let items = input.as_array().map(Vec::as_slice).unwrap_or(&[]);
    (0..TEMP_GRID_TOTAL)
        .map(|index| {
            let item = items.get(index);
            TempGridBlock {
                vlan: string_field(item, "vlan"),
                switch_name: string_field(item, "switchName"),
                port_number: string_field(item, "portNumber"),
            }
        })
        .collect()
}

fn string_field(item: Option<&Value>, key: &str) -> String {
    item.and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct TempGridStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl TempGridStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Cells survive load even when individual fields are malformed, so
    /// this store normalizes from the raw JSON instead of a strict parse.
    async fn load(&self) -> Result<TempGridDocument> {
        let raw = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let doc = TempGridDocument::default();
                persist_document(&self.path, &doc).await?;
                return Ok(doc);
            }
            Err(err) => return Err(err.into()),
        };

        let on_disk: Option<Value> = serde_json::from_slice(&raw).ok();
        let doc = TempGridDocument {
            blocks: normalize_blocks(
                on_disk
                    .as_ref()
                    .and_then(|value| value.get("blocks"))
                    .unwrap_or(&Value::Null),
            ),
        };

        let repaired = serde_json::to_value(&doc)?;
        if on_disk.as_ref() != Some(&repaired) {
            persist_document(&self.path, &doc).await?;
        }
        Ok(doc)
    }

    pub async fn blocks(&self) -> Result<Vec<TempGridBlock>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.blocks)
    }

    /// Replaces the stored array wholesale with the normalized input.
    pub async fn save(&self, raw_blocks: &Value) -> Result<Vec<TempGridBlock>> {
        let _guard = self.lock.lock().await;
        let doc = TempGridDocument {
            blocks: normalize_blocks(raw_blocks),
        };
        persist_document(&self.path, &doc).await?;
        Ok(doc.blocks)
    }
}
