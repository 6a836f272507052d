use serde::{Deserialize, Serialize};

pub const TEMP_GRID_TOTAL: usize = 41;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempGridBlock {
    #[serde(default)]
    pub vlan: String,
    #[serde(default)]
    pub switch_name: String,
    #[serde(default)]
    pub port_number: String,
}
