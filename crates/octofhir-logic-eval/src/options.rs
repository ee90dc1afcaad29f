//! Evaluation options

use serde::{Deserialize, Serialize};

/// Default limit on criteria nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationOptions {
    /// Deepest criteria tree accepted, a single leaf being depth 1
    pub max_depth: usize,
    /// Drop observations outside a leaf's time window even if the source
    /// returned them
    pub enforce_windows: bool,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            enforce_windows: true,
        }
    }
}

impl EvaluationOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_enforce_windows(mut self, enforce: bool) -> Self {
        self.enforce_windows = enforce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let options: EvaluationOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(options.max_depth, 8);
        assert!(options.enforce_windows);
    }
}
