// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use gocheck_subunit::{EventRecorder, LineClassifier, StaticRebootState, SubunitParserReporter};

/// Synthetic verbose gocheck run with `tests` tests
fn transcript(tests: usize) -> String {
    let mut out = String::new();
    for i in 0..tests {
        out.push_str(&format!("****** Running benchSuite.TestCase{i}\n"));
        out.push_str(&format!("START: /src/bench_test.go:{i}: benchSuite.TestCase{i}\n"));
        out.push_str("START: <autogenerated>:20: benchSuite.SetUpTest\n");
        out.push_str("PASS: <autogenerated>:20: benchSuite.SetUpTest\t0.001s\n");
        match i % 3 {
            0 => out.push_str(&format!(
                "PASS: /src/bench_test.go:{i}: benchSuite.TestCase{i}\t0.012s\n"
            )),
            1 => {
                out.push_str(&format!("FAIL: /src/bench_test.go:{i}: benchSuite.TestCase{i}\n"));
                out.push_str("bench_test.go:97:\n    c.Assert(err, check.IsNil)\n");
            }
            _ => out.push_str(&format!(
                "SKIP: /src/bench_test.go:{i}: benchSuite.TestCase{i} (not on this arch)\n"
            )),
        }
    }
    out
}

fn parser_benchmark(c: &mut Criterion) {
    let input = transcript(1000);

    let mut group = c.benchmark_group("parser");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("whole_transcript", |b| {
        b.iter(|| {
            let mut parser =
                SubunitParserReporter::new(EventRecorder::new(), StaticRebootState::none())
                    .expect("rules compile");
            parser.write_chunk(black_box(input.as_bytes()));
            black_box(parser.finish())
        })
    });

    group.bench_function("pipe_sized_chunks", |b| {
        b.iter(|| {
            let mut parser =
                SubunitParserReporter::new(EventRecorder::new(), StaticRebootState::none())
                    .expect("rules compile");
            for chunk in input.as_bytes().chunks(4096) {
                parser.write_chunk(black_box(chunk));
            }
            black_box(parser.finish())
        })
    });

    group.finish();
}

fn classifier_benchmark(c: &mut Criterion) {
    let classifier = LineClassifier::new().expect("rules compile");
    let lines = [
        "****** Running benchSuite.TestCase1",
        "PASS: /src/bench_test.go:34: benchSuite.TestCase1\t0.012s",
        "SKIP: /src/bench_test.go:36: benchSuite.TestCase2 (not on this arch)",
        "    c.Assert(err, check.IsNil)",
    ];

    c.bench_function("classify_line", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(classifier.classify(black_box(line)));
            }
        })
    });
}

criterion_group!(benches, parser_benchmark, classifier_benchmark);
criterion_main!(benches);
