// ABOUTME: Criterion benchmarks for the per-frame repetition classifier
// ABOUTME: Measures rule evaluation, flat buffer decoding and full session replays
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Criterion benchmarks for the repetition classifier.
//!
//! The classifier runs once per camera frame, so these measure the cost of a
//! single frame for each exercise and of replaying a one-minute session.

#![allow(clippy::missing_docs_in_private_items, missing_docs, clippy::unwrap_used)]

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rep_counter::clock::ManualClock;
use rep_counter::config::RuleThresholds;
use rep_counter::constants::landmarks::{FLAT_STRIDE_XYZV, LANDMARK_COUNT};
use rep_counter::frames::{Frame, VecFrameSource};
use rep_counter::intelligence::{process_frame, ClassifierState};
use rep_counter::lifecycle::StopSignal;
use rep_counter::models::{ExerciseKind, LandmarkSnapshot};
use rep_counter::presentation::CollectingSink;
use rep_counter::runner::SessionRunner;

/// One minute of frames at 30 fps
const SESSION_FRAMES: u64 = 1_800;

/// Full-body detector buffer with every point visible, oscillating with `phase`
fn flat_buffer(phase: f32) -> Vec<f32> {
    (0..LANDMARK_COUNT)
        .flat_map(|i| {
            let offset = i as f32 / LANDMARK_COUNT as f32;
            [
                0.3 + 0.4 * offset,
                0.2 + 0.6 * ((offset + phase).sin().abs()),
                0.0,
                0.95,
            ]
        })
        .collect()
}

fn frame_at(index: u64) -> Duration {
    Duration::from_millis(index * 100 / 3)
}

fn bench_single_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_frame");
    let snapshot = LandmarkSnapshot::from_flat(&flat_buffer(0.25)).unwrap();

    for exercise in ExerciseKind::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(exercise.as_str()),
            &exercise,
            |b, &exercise| {
                let mut state = ClassifierState::default();
                let mut index = 0_u64;
                b.iter(|| {
                    index += 1;
                    let outcome = process_frame(
                        black_box(state),
                        exercise,
                        Some(black_box(&snapshot)),
                        frame_at(index),
                    );
                    state = outcome.state;
                });
            },
        );
    }

    group.bench_function("no_body_detected", |b| {
        let state = ClassifierState::default();
        b.iter(|| process_frame(black_box(state), ExerciseKind::Squat, None, Duration::ZERO));
    });

    group.finish();
}

fn bench_flat_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_decode");
    let buffer = flat_buffer(0.5);
    group.throughput(Throughput::Elements((buffer.len() / FLAT_STRIDE_XYZV) as u64));
    group.bench_function("xyzv_33_points", |b| {
        b.iter(|| LandmarkSnapshot::from_flat(black_box(&buffer)));
    });
    group.finish();
}

fn bench_session_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_replay");
    let frames: Vec<Frame> = (0..SESSION_FRAMES)
        .map(|i| {
            let snapshot = LandmarkSnapshot::from_flat(&flat_buffer(i as f32 * 0.1)).unwrap();
            Frame::with_landmarks(snapshot).at(frame_at(i))
        })
        .collect();

    group.throughput(Throughput::Elements(SESSION_FRAMES));
    for exercise in ExerciseKind::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(exercise.as_str()),
            &exercise,
            |b, &exercise| {
                b.iter(|| {
                    let mut runner = SessionRunner::new(exercise, RuleThresholds::default());
                    let mut sink = CollectingSink::default();
                    runner
                        .run(
                            VecFrameSource::new(frames.clone()),
                            &ManualClock::new(),
                            &mut sink,
                            &StopSignal::new(),
                        )
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_frame,
    bench_flat_decode,
    bench_session_replay
);
criterion_main!(benches);
