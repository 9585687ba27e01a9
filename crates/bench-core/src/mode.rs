//! Loading mode selection.

use serde::{Deserialize, Serialize};

/// Whether the target table carries constraints at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// No primary key or indexes exist yet; the fastest bulk path is allowed.
    Unconstrained,
    /// A primary key or indexes exist; the load must honour them.
    Constrained,
}

impl LoadMode {
    /// Whether a backend may use a path that bypasses constraint checking.
    pub fn allows_direct_path(self) -> bool {
        matches!(self, LoadMode::Unconstrained)
    }
}

impl std::fmt::Display for LoadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadMode::Unconstrained => write!(f, "unconstrained"),
            LoadMode::Constrained => write!(f, "constrained"),
        }
    }
}
