// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the line classifier

#![no_main]

use libfuzzer_sys::fuzz_target;

use gocheck_subunit::LineClassifier;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        if let Ok(classifier) = LineClassifier::new() {
            // Classification should never panic
            let _ = classifier.classify(line);
        }
    }
});
