//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod config_service;
pub mod kubelet;
pub mod kubelet_config;
pub mod mounter;

use crate::application::ports::TaskSink;
use crate::domain::task::Task;

/// Hand a finished build to the convergence engine, preserving order.
pub fn deliver(tasks: Vec<Task>, sink: &mut impl TaskSink) {
    for task in tasks {
        sink.add_task(task);
    }
}
