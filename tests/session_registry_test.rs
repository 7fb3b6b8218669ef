// ABOUTME: Integration tests for the concurrent session registry
// ABOUTME: Covers independent sessions, resets, status snapshots, limits and parallel access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use common::{at_30fps, hands, init_test_logging, leg_at, tree};
use rep_counter::config::RuleThresholds;
use rep_counter::errors::ErrorCode;
use rep_counter::intelligence::RepEvent;
use rep_counter::models::ExerciseKind;
use rep_counter::sessions::{SessionId, SessionRegistry};

fn registry(max_sessions: usize) -> SessionRegistry {
    init_test_logging();
    SessionRegistry::new(RuleThresholds::default(), max_sessions)
}

#[test]
fn test_sessions_count_independently() {
    let registry = registry(8);
    let ana = registry.open_session("ana").unwrap();
    let ben = registry.open_session("ben").unwrap();
    assert_ne!(ana, ben);

    for angle in [170.0, 80.0, 170.0, 80.0] {
        registry
            .process(ana, ExerciseKind::Squat, Some(&leg_at(angle)), Duration::ZERO)
            .unwrap();
    }
    let outcome = registry
        .process(ben, ExerciseKind::HandRaise, Some(&hands(true)), Duration::ZERO)
        .unwrap();
    assert_eq!(outcome.event, RepEvent::RepCounted);

    let ana_status = registry.status(ana).unwrap();
    assert_eq!(ana_status.owner, "ana");
    assert_eq!(ana_status.rep_count, 2);
    assert_eq!(ana_status.frames_processed, 4);
    assert_eq!(ana_status.last_exercise, Some(ExerciseKind::Squat));

    let ben_status = registry.status(ben).unwrap();
    assert_eq!(ben_status.rep_count, 1);
    assert_eq!(ben_status.last_exercise, Some(ExerciseKind::HandRaise));
}

#[test]
fn test_exercise_is_a_per_call_input() {
    let registry = registry(1);
    let id = registry.open_session("ana").unwrap();

    registry
        .process(id, ExerciseKind::TreePose, Some(&tree(true)), Duration::ZERO)
        .unwrap();
    registry
        .process(id, ExerciseKind::HandRaise, Some(&hands(true)), at_30fps(1))
        .unwrap();
    let outcome = registry
        .process(id, ExerciseKind::TreePose, Some(&tree(true)), Duration::from_secs(2))
        .unwrap();

    assert_eq!(outcome.event, RepEvent::RepCounted);
    assert_eq!(registry.status(id).unwrap().rep_count, 2);
}

#[test]
fn test_reset_zeroes_only_that_session() {
    let registry = registry(4);
    let ana = registry.open_session("ana").unwrap();
    let ben = registry.open_session("ben").unwrap();
    for id in [ana, ben] {
        registry
            .process(id, ExerciseKind::HandRaise, Some(&hands(true)), Duration::ZERO)
            .unwrap();
    }

    registry.reset(ana).unwrap();
    assert_eq!(registry.status(ana).unwrap().rep_count, 0);
    assert_eq!(registry.status(ben).unwrap().rep_count, 1);
}

#[test]
fn test_closed_session_is_gone() {
    let registry = registry(4);
    let id = registry.open_session("ana").unwrap();
    registry
        .process(id, ExerciseKind::HandRaise, Some(&hands(true)), Duration::ZERO)
        .unwrap();

    let final_status = registry.close_session(id).unwrap();
    assert_eq!(final_status.rep_count, 1);
    assert!(registry.is_empty());

    for error in [
        registry.status(id).unwrap_err(),
        registry.reset(id).unwrap_err(),
        registry.close_session(id).unwrap_err(),
        registry
            .process(id, ExerciseKind::Squat, None, Duration::ZERO)
            .unwrap_err(),
    ] {
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.context.session_id, Some(id.as_uuid()));
    }
}

#[test]
fn test_unknown_session_id_not_found() {
    let registry = registry(4);
    let error = registry.status(SessionId::new()).unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[test]
fn test_sessions_for_owner() {
    let registry = registry(4);
    registry.open_session("ana").unwrap();
    registry.open_session("ana").unwrap();
    registry.open_session("ben").unwrap();
    assert_eq!(registry.sessions_for("ana").len(), 2);
    assert_eq!(registry.sessions_for("carl").len(), 0);
}

#[test]
fn test_concurrent_opens_respect_limit() {
    let registry = Arc::new(registry(5));
    let handles: Vec<_> = (0..20)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.open_session(&format!("user-{i}")).is_ok())
        })
        .collect();
    let opened = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(opened, 5);
    assert_eq!(registry.len(), 5);
}

#[test]
fn test_parallel_sessions_each_see_ordered_frames() {
    let registry = Arc::new(registry(8));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let id = registry.open_session(&format!("user-{i}")).unwrap();
                for frame in 0..40_u64 {
                    let raised = frame % 4 >= 2;
                    registry
                        .process(
                            id,
                            ExerciseKind::HandRaise,
                            Some(&hands(raised)),
                            at_30fps(frame),
                        )
                        .unwrap();
                }
                id
            })
        })
        .collect();

    for handle in handles {
        let id = handle.join().unwrap();
        let status = registry.status(id).unwrap();
        assert_eq!(status.frames_processed, 40);
        assert_eq!(status.rep_count, 10);
    }
}
