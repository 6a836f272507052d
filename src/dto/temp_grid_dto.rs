use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::temp_grid::TempGridBlock;

#[derive(Debug, Clone, Deserialize)]
pub struct SaveTempGridPayload {
    /// Taken as raw JSON; the store coerces it into the fixed-size grid.
    #[serde(default)]
    pub blocks: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct TempGridResponse {
    pub blocks: Vec<TempGridBlock>,
}
