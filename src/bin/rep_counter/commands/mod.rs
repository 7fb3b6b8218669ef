// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors
// ABOUTME: Re-exports command modules for rep-counter
// ABOUTME: Provides access to the replay and exercise listing commands

pub mod exercises;
pub mod replay;
