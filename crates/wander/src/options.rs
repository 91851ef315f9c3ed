use serde::{Deserialize, Serialize};
use wander_types::DEFAULT_CALL_LIMIT;

/// Per-run configuration.
///
/// Every field has a default, so a host can supply a partial JSON object:
///
/// ```json
/// { "step_limit": 10000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Maximum evaluation steps before the run fails. `None` is unbounded.
    pub step_limit: Option<u64>,
    /// Maximum function calls active at once.
    pub call_limit: usize,
    /// Name reported in diagnostics.
    pub source_name: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            step_limit: None,
            call_limit: DEFAULT_CALL_LIMIT,
            source_name: "<script>".to_string(),
        }
    }
}

impl RunOptions {
    /// Load options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_call_limit(mut self, limit: usize) -> Self {
        self.call_limit = limit;
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }
}
