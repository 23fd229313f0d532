// lib/crates/nodeup-api/src/role.rs

use serde::{Deserialize, Serialize};

/// Role a cluster member plays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Role {
    /// Control-plane member.
    #[serde(alias = "master")]
    Master,
    /// Worker.
    #[default]
    #[serde(alias = "node")]
    Node,
}

impl Role {
    /// Lowercase name used in labels and taints.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Node => "node",
        }
    }

    #[must_use]
    pub fn is_master(self) -> bool {
        self == Self::Master
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
