// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors
// ABOUTME: Output formatting helpers for rep-counter
// ABOUTME: Provides the end-of-session summary shown after a replay

use rep_counter::runner::SessionSummary;

/// Display the totals of a finished replay
pub fn display_summary(summary: &SessionSummary) {
    println!("\nSession complete");
    println!("{}", "=".repeat(40));
    println!("   Exercise: {}", summary.exercise.display_name());
    println!("   Reps: {}", summary.rep_count);
    println!("   Frames: {}", summary.frames_processed);
    println!("   Skipped frames: {}", summary.frames_skipped);
    if summary.resets > 0 {
        println!("   Counter resets: {}", summary.resets);
    }
    println!("   Duration: {:.1}s", summary.duration.as_secs_f64());
    if summary.stopped {
        println!("   Stopped early by Ctrl-C");
    }
    println!("{}", "=".repeat(40));
}
