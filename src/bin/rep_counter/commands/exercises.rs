// ABOUTME: Exercise listing command for rep-counter
// ABOUTME: Prints each supported exercise with its keypoints and the thresholds in effect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use rep_counter::config::environment::AppConfig;
use rep_counter::intelligence::{required_points, RuleThresholds};
use rep_counter::models::ExerciseKind;

/// Print every supported exercise
pub fn list(config: &AppConfig) {
    println!("\nSupported exercises:");
    println!("{}", "=".repeat(72));
    for exercise in ExerciseKind::ALL {
        let marker = if exercise == config.default_exercise {
            " (default)"
        } else {
            ""
        };
        println!("{} [{}]{marker}", exercise.display_name(), exercise.as_str());
        println!("   Rule: {}", describe_rule(exercise, &config.thresholds));
        let points: Vec<String> = required_points(exercise)
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("   Keypoints: {}", points.join(", "));
    }
    println!("{}", "=".repeat(72));
    println!(
        "Landmarks reporting visibility below {:.2} are ignored.",
        config.thresholds.min_visibility
    );
}

fn describe_rule(exercise: ExerciseKind, thresholds: &RuleThresholds) -> String {
    match exercise {
        ExerciseKind::Squat => format!(
            "one rep when the knee angle drops below {:.0} deg after rising above {:.0} deg",
            thresholds.squat_down_angle, thresholds.squat_up_angle
        ),
        ExerciseKind::HandRaise => {
            "one rep each time the wrist rises above the shoulder".to_owned()
        }
        ExerciseKind::TreePose => format!(
            "one rep per {:.1}s hold with the raised ankle above the standing knee and within {:.2} of the hip",
            thresholds.hold_duration.as_secs_f64(),
            thresholds.tree_pose_x_tolerance
        ),
        ExerciseKind::WarriorII => format!(
            "one rep per {:.1}s hold with the front knee between {:.0} and {:.0} deg",
            thresholds.hold_duration.as_secs_f64(),
            thresholds.warrior_min_angle,
            thresholds.warrior_max_angle
        ),
    }
}
