// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test events handed to a [`Sink`](crate::sink::Sink)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reboot::is_reboot_sentinel;

/// MIME type of the reason attached to skip events
pub const REASON_MIME_TYPE: &str = "text/plain;charset=utf8";

/// Attachment name of the reason attached to skip events
pub const REASON_FILE_NAME: &str = "reason";

/// Subunit test status carried by an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Test was announced as running
    Exists,
    /// Test passed
    Success,
    /// Test failed or panicked
    Fail,
    /// Test was skipped
    Skip,
}

impl TestStatus {
    /// Subunit name of the status
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single test event
///
/// The attachment fields are only populated for skip events that carry a
/// reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Dotted `Suite.Test` identifier
    pub test_id: String,
    /// Test status
    pub status: TestStatus,
    /// MIME type of the attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Attachment name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Attachment body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_bytes: Option<Vec<u8>>,
}

impl Event {
    /// Create an event without attachment
    #[must_use]
    pub fn new(test_id: impl Into<String>, status: TestStatus) -> Self {
        Self {
            test_id: test_id.into(),
            status,
            mime_type: None,
            file_name: None,
            file_bytes: None,
        }
    }

    /// Create a skip event, attaching `reason` when there is one
    #[must_use]
    pub fn skip(test_id: impl Into<String>, reason: Option<&str>) -> Self {
        let mut event = Self::new(test_id, TestStatus::Skip);
        if let Some(reason) = reason {
            event.mime_type = Some(REASON_MIME_TYPE.to_string());
            event.file_name = Some(REASON_FILE_NAME.to_string());
            event.file_bytes = Some(reason.as_bytes().to_vec());
        }
        event
    }

    /// The attached reason as text, if any
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.file_bytes
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Whether this is a skip recording a reboot of the test machine
    #[must_use]
    pub fn is_reboot_skip(&self) -> bool {
        self.status == TestStatus::Skip && self.reason().is_some_and(is_reboot_sentinel)
    }
}
