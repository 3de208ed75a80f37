use serde::{Deserialize, Serialize};

/// Outcome of an update/delete: how many rows the scoped statement touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub affected: u64,
}

impl From<u64> for MutationResult {
    fn from(affected: u64) -> Self { Self { affected } }
}
