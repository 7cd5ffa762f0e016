// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Streaming gocheck parser and reporter
//!
//! [`SubunitParserReporter`] accepts gocheck output in arbitrary chunks,
//! reassembles lines, classifies them and reports at most one [`Event`] per
//! line to its [`Sink`].
//!
//! Three kinds of noise are filtered out:
//!
//! - fixture methods (`SetUp*`, `TearDown*`) are never reported. A fixture
//!   skipped with a reason absorbs the bare `SKIP` line gocheck prints next
//!   for the test it prepared;
//! - while the [`RebootState`] says a reboot is pending or has just
//!   happened, only the skips recording the reboot get through;
//! - outside a reboot, those reboot skips are bookkeeping of the reboot
//!   harness and are dropped.
//!
//! A bare `SKIP` line naming a test waits for its reason on the next line at
//! the same location. If anything else comes first, the test is still
//! reported as skipped, without a reason.
//!
//! # Example
//!
//! ```
//! use gocheck_subunit::{EventRecorder, StaticRebootState, SubunitParserReporter, TestStatus};
//!
//! let mut parser = SubunitParserReporter::new(EventRecorder::new(), StaticRebootState::none())?;
//! parser.write_chunk(b"****** Running testSuite.TestA\nPASS: /src/a_test.go:12: testSuite.Te");
//! parser.write_chunk(b"stA      0.005s\n");
//!
//! let events = parser.sink().events();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1].status, TestStatus::Success);
//! # Ok::<(), gocheck_subunit::ReportError>(())
//! ```

use std::io;

use tracing::{debug, trace, warn};

use crate::classifier::{Classification, LineClassifier, LineShape, is_fixture, is_test_id};
use crate::error::ReportError;
use crate::event::{Event, TestStatus};
use crate::reboot::RebootState;
use crate::sink::Sink;

/// Default cap on a single unterminated line, in bytes
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// A skip waiting for its second line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    /// A skip without inline reason; the reason follows at `location`
    AwaitingReason { test_id: String, location: String },
    /// A fixture skipped with `reason`; the dependent test follows at
    /// `location`
    FixtureSkipped { location: String, reason: String },
}

/// Streaming translator from gocheck output to test events
#[derive(Debug)]
pub struct SubunitParserReporter<S, R> {
    classifier: LineClassifier,
    sink: S,
    reboot: R,
    buffer: Vec<u8>,
    max_line_bytes: usize,
    /// The line being buffered already overflowed and is being discarded
    overflowing: bool,
    pending: Option<Pending>,
    current_test: Option<String>,
}

impl<S: Sink, R: RebootState> SubunitParserReporter<S, R> {
    /// Create a parser reporting to `sink`
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidPattern` if the line rules fail to
    /// compile.
    pub fn new(sink: S, reboot: R) -> Result<Self, ReportError> {
        Ok(Self {
            classifier: LineClassifier::new()?,
            sink,
            reboot,
            buffer: Vec::new(),
            max_line_bytes: MAX_LINE_BYTES,
            overflowing: false,
            pending: None,
            current_test: None,
        })
    }

    /// Cap the bytes kept for a line that has no newline yet
    ///
    /// A line growing past `limit` is discarded up to its newline. gocheck
    /// status lines are far shorter than [`MAX_LINE_BYTES`], the default.
    #[must_use]
    pub fn with_max_line_bytes(mut self, limit: usize) -> Self {
        self.max_line_bytes = limit;
        self
    }

    /// Feed the next chunk of output
    ///
    /// Every complete line in the chunk is processed before returning; a
    /// trailing partial line is kept until a later chunk completes it.
    pub fn write_chunk(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);

        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            if self.overflowing {
                self.overflowing = false;
            } else {
                let line = String::from_utf8_lossy(&self.buffer[start..end]).into_owned();
                self.process_line(line.trim_end_matches('\r'));
            }
            start = end + 1;
        }
        self.buffer.drain(..start);

        if self.buffer.len() > self.max_line_bytes {
            warn!(
                buffered = self.buffer.len(),
                limit = self.max_line_bytes,
                "Discarding overlong line"
            );
            self.buffer.clear();
            self.overflowing = true;
        }
    }

    /// End the stream and hand back the sink
    ///
    /// A final line without trailing newline is processed. A test whose
    /// skip is still waiting for its reason is reported without one.
    pub fn finish(mut self) -> S {
        if !self.buffer.is_empty() && !self.overflowing {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest).into_owned();
            self.process_line(line.trim_end_matches('\r'));
        }
        self.flush_pending("end of stream");
        self.sink
    }

    /// The sink receiving events
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Bytes received but not yet terminated by a newline
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Whether a skip is waiting for its second line
    #[must_use]
    pub fn has_pending_skip(&self) -> bool {
        self.pending.is_some()
    }

    /// The test announced by the latest `****** Running` line
    #[must_use]
    pub fn current_test(&self) -> Option<&str> {
        self.current_test.as_deref()
    }

    fn process_line(&mut self, line: &str) {
        let Some(classification) = self.classifier.classify(line) else {
            return;
        };
        trace!(?classification, "Classified line");

        let status = classification.status();
        let Classification {
            shape,
            test_id,
            location,
        } = classification;

        match shape {
            LineShape::Running => {
                self.flush_pending("new test started");
                if is_fixture(&test_id) {
                    return;
                }
                self.current_test = Some(test_id.clone());
                self.emit(Event::new(test_id, TestStatus::Exists));
            }
            LineShape::Pass | LineShape::Fail => {
                self.flush_pending("test finished");
                if !is_fixture(&test_id) {
                    self.emit(Event::new(test_id, status));
                }
            }
            LineShape::SkipWithReason(reason) => {
                self.flush_pending("test skipped");
                if !is_fixture(&test_id) {
                    self.emit(Event::skip(test_id, Some(&reason)));
                } else if let Some(location) = location {
                    self.pending = Some(Pending::FixtureSkipped { location, reason });
                }
            }
            LineShape::Skip => {
                if let Some(location) = location {
                    self.correlate_skip(test_id, location);
                }
            }
        }
    }

    /// Resolve a bare `SKIP: <loc>: <text>` line against the pending slot
    fn correlate_skip(&mut self, text: String, location: String) {
        match self.pending.take() {
            Some(Pending::AwaitingReason {
                test_id,
                location: pending_location,
            }) if pending_location == location => {
                self.emit(Event::skip(test_id, Some(&text)));
            }
            Some(Pending::FixtureSkipped {
                location: pending_location,
                reason,
            }) if pending_location == location && !is_fixture(&text) => {
                debug!(test_id = %text, %reason, "Test skipped by its fixture");
            }
            stale => {
                self.pending = stale;
                self.flush_pending("skip at another location");

                // A skipped fixture without reason stands for the test it prepares
                let test_id = if is_fixture(&text) {
                    self.current_test.clone()
                } else if is_test_id(&text) {
                    Some(text)
                } else {
                    debug!(%location, "Skip reason without a pending test");
                    return;
                };

                match test_id {
                    Some(test_id) => {
                        self.pending = Some(Pending::AwaitingReason { test_id, location });
                    }
                    None => debug!(%location, "Fixture skipped outside of any test"),
                }
            }
        }
    }

    /// Settle the pending slot before a line that supersedes it
    fn flush_pending(&mut self, cause: &str) {
        match self.pending.take() {
            Some(Pending::AwaitingReason { test_id, location }) => {
                debug!(%test_id, %location, cause, "Skip reported without reason");
                self.emit(Event::skip(test_id, None));
            }
            Some(stale @ Pending::FixtureSkipped { .. }) => {
                debug!(?stale, cause, "Fixture skip had no dependent test");
            }
            None => {}
        }
    }

    fn emit(&mut self, event: Event) {
        let suppressing = self.reboot.suppresses_reports();
        let reboot_skip = event.is_reboot_skip();
        if suppressing != reboot_skip {
            debug!(
                test_id = %event.test_id,
                status = %event.status,
                suppressing,
                "Dropping event outside its reboot phase"
            );
            return;
        }

        let status = event.status;
        if let Err(e) = self.sink.report(event) {
            warn!(error = %e, %status, "Sink rejected event");
        }
    }
}

impl<S: Sink, R: RebootState> io::Write for SubunitParserReporter<S, R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_chunk(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
