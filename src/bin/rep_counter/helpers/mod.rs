// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors
// ABOUTME: Re-exports helper modules for rep-counter
// ABOUTME: Provides access to terminal display formatting utilities

pub mod display;
