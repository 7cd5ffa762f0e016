// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Reboot awareness
//!
//! Integration suites may reboot the machine under test halfway through a
//! run. While a reboot is pending, and again once the run resumes after it,
//! the runner replays output for tests that were already reported, so the
//! parser asks a [`RebootState`] before every report and drops everything
//! except the skips that record the reboot itself.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Skip reason for tests held back while a reboot is pending
pub const SKIP_DURING_REBOOT: &str = "waiting for reboot";

/// Skip reason for tests that already ran before a reboot
pub const SKIP_AFTER_REBOOT: &str = "test run after reboot";

/// Default environment variable set by the test bed after a reboot
pub const DEFAULT_REBOOT_ENV_VAR: &str = "ADT_REBOOT_MARK";

/// Default marker file written by a test that requests a reboot
pub const DEFAULT_REBOOT_MARKER_FILE: &str = "/tmp/needs-reboot";

/// Whether `reason` is exactly one of the reboot skip reasons
#[must_use]
pub fn is_reboot_sentinel(reason: &str) -> bool {
    reason == SKIP_DURING_REBOOT || reason == SKIP_AFTER_REBOOT
}

/// Capability answering the two reboot questions
///
/// Implementations must answer from the current state of the world on every
/// call; the parser relies on them not caching.
pub trait RebootState {
    /// A reboot was requested and has not happened yet
    fn is_rebooting(&self) -> bool;

    /// The run resumed after a reboot
    fn is_after_reboot(&self) -> bool;

    /// Whether ordinary events must be withheld right now
    fn suppresses_reports(&self) -> bool {
        self.is_rebooting() || self.is_after_reboot()
    }
}

impl<R: RebootState + ?Sized> RebootState for &R {
    fn is_rebooting(&self) -> bool {
        (**self).is_rebooting()
    }

    fn is_after_reboot(&self) -> bool {
        (**self).is_after_reboot()
    }
}

/// Where to look for reboot markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebootConfig {
    /// Environment variable holding a non-empty value after a reboot
    pub env_var: String,
    /// File whose presence means a reboot is pending
    pub marker_file: PathBuf,
}

impl Default for RebootConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_REBOOT_ENV_VAR.to_string(),
            marker_file: PathBuf::from(DEFAULT_REBOOT_MARKER_FILE),
        }
    }
}

/// Reboot state read from the process environment and the filesystem
#[derive(Debug, Clone, Default)]
pub struct MarkerRebootState {
    config: RebootConfig,
}

impl MarkerRebootState {
    /// Create a reboot state reader for the given markers
    #[must_use]
    pub fn new(config: RebootConfig) -> Self {
        Self { config }
    }

    /// The markers being watched
    #[must_use]
    pub fn config(&self) -> &RebootConfig {
        &self.config
    }
}

impl RebootState for MarkerRebootState {
    fn is_rebooting(&self) -> bool {
        self.config.marker_file.exists()
    }

    fn is_after_reboot(&self) -> bool {
        std::env::var_os(&self.config.env_var).is_some_and(|value| !value.is_empty())
    }
}

/// Reboot state with fixed answers
///
/// Useful when replaying archived output, where the live markers say
/// nothing about the run being replayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticRebootState {
    /// Answer for [`RebootState::is_rebooting`]
    pub rebooting: bool,
    /// Answer for [`RebootState::is_after_reboot`]
    pub after_reboot: bool,
}

impl StaticRebootState {
    /// Neither marker present
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Reboot pending
    #[must_use]
    pub fn rebooting() -> Self {
        Self {
            rebooting: true,
            after_reboot: false,
        }
    }

    /// Resumed after a reboot
    #[must_use]
    pub fn after_reboot() -> Self {
        Self {
            rebooting: false,
            after_reboot: true,
        }
    }
}

impl RebootState for StaticRebootState {
    fn is_rebooting(&self) -> bool {
        self.rebooting
    }

    fn is_after_reboot(&self) -> bool {
        self.after_reboot
    }
}
