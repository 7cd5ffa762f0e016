// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Event sinks
//!
//! A [`Sink`] receives finished events. The parser never looks at the
//! outcome beyond logging a failure.

use std::io::Write;

use crate::error::ReportError;
use crate::event::Event;

/// Receiver of finished test events
pub trait Sink {
    /// Deliver one event
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be delivered. The parser
    /// logs it and carries on with the next line.
    fn report(&mut self, event: Event) -> Result<(), ReportError>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn report(&mut self, event: Event) -> Result<(), ReportError> {
        (**self).report(event)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn report(&mut self, event: Event) -> Result<(), ReportError> {
        (**self).report(event)
    }
}

/// In-memory sink keeping every event in arrival order
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<Event>,
}

impl EventRecorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events received
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been received
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget all received events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take the received events
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Sink for EventRecorder {
    fn report(&mut self, event: Event) -> Result<(), ReportError> {
        self.events.push(event);
        Ok(())
    }
}

/// Sink writing one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn report(&mut self, event: Event) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.writer, &event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
