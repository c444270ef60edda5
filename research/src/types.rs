//! Research-internal types

use serde::{Deserialize, Serialize};

/// Casino discovery answer for one jurisdiction.
///
/// Mirrors the JSON shape the discovery prompt asks the provider for.
/// Both fields default so a partially formed answer still parses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateCasinos {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub casinos: Vec<String>,
}
