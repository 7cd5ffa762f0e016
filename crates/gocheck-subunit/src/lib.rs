// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gocheck-subunit: gocheck output to subunit-style test events
//!
//! This library crate reads the textual output of a gocheck test run and
//! turns it into one structured event per reportable line (test id, status
//! and, for skips, the reason), filtering out fixture bookkeeping and the
//! noise produced around machine reboots.
//!
//! # Example
//!
//! ```no_run
//! use gocheck_subunit::{JsonLinesSink, MarkerRebootState, SubunitParserReporter};
//!
//! let sink = JsonLinesSink::new(std::io::stdout());
//! let mut parser = SubunitParserReporter::new(sink, MarkerRebootState::default())?;
//!
//! // Pipe gocheck output straight through the parser
//! std::io::copy(&mut std::io::stdin().lock(), &mut parser)?;
//! parser.finish();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod classifier;
pub mod error;
pub mod event;
pub mod parser;
pub mod reboot;
pub mod sink;

pub use classifier::{Classification, LineClassifier, LineShape};
pub use error::ReportError;
pub use event::{Event, TestStatus};
pub use parser::{MAX_LINE_BYTES, SubunitParserReporter};
pub use reboot::{MarkerRebootState, RebootConfig, RebootState, StaticRebootState};
pub use sink::{EventRecorder, JsonLinesSink, Sink};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ReportError;
    pub use crate::event::{Event, TestStatus};
    pub use crate::parser::SubunitParserReporter;
    pub use crate::reboot::{MarkerRebootState, RebootState, StaticRebootState};
    pub use crate::sink::{EventRecorder, Sink};
}
