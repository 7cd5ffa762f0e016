// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the streaming parser
//!
//! Feeds arbitrary bytes in arbitrary chunk sizes under an arbitrary reboot
//! state. The parser must never panic and must report at most one event
//! per input line.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use gocheck_subunit::{EventRecorder, StaticRebootState, SubunitParserReporter};

#[derive(Debug, Arbitrary)]
struct Input {
    chunk_size: u8,
    rebooting: bool,
    after_reboot: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let reboot = StaticRebootState {
        rebooting: input.rebooting,
        after_reboot: input.after_reboot,
    };
    let Ok(mut parser) = SubunitParserReporter::new(EventRecorder::new(), reboot) else {
        return;
    };

    let chunk_size = usize::from(input.chunk_size).max(1);
    for chunk in input.data.chunks(chunk_size) {
        parser.write_chunk(chunk);
    }

    let lines = input.data.split(|&b| b == b'\n').count();
    let events = parser.finish();
    assert!(events.len() <= lines);
});
