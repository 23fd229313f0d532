//! Node role labels and taint syntax.

use std::sync::LazyLock;

use nodeup_api::Role;
use regex::Regex;

use crate::domain::error::ConfigError;

/// Label marking a control-plane node.
pub const ROLE_LABEL_MASTER: &str = "node-role.kubernetes.io/master";
/// Label marking a worker node.
pub const ROLE_LABEL_NODE: &str = "node-role.kubernetes.io/node";
/// Older role label, still read by some tooling.
pub const ROLE_LABEL_LEGACY: &str = "kubernetes.io/role";

/// Taint every master registers with unless told otherwise.
pub const MASTER_TAINT: &str = "node-role.kubernetes.io/master=:NoSchedule";

/// `key=value:effect`, key optionally prefixed by a DNS subdomain.
pub static TAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"^([a-z0-9]([-a-z0-9.]*[a-z0-9])?/)?[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?=[A-Za-z0-9_.-]*:(NoSchedule|PreferNoSchedule|NoExecute)$",
    )
    .expect("valid regex")
});

/// The label pairs identifying `role`.
#[must_use]
pub fn role_labels(role: Role) -> [(&'static str, &'static str); 2] {
    match role {
        Role::Master => [(ROLE_LABEL_MASTER, ""), (ROLE_LABEL_LEGACY, "master")],
        Role::Node => [(ROLE_LABEL_NODE, ""), (ROLE_LABEL_LEGACY, "node")],
    }
}

/// Check that `taint` is a registrable taint.
///
/// # Errors
///
/// Returns `ConfigError::InvalidTaint` when it is not `key=value:effect`.
pub fn validate_taint(taint: &str) -> Result<(), ConfigError> {
    if TAINT_RE.is_match(taint) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTaint {
            taint: taint.to_string(),
        })
    }
}
