// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sb3saver: Core types, launch configuration, and errors shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::{HostMode, LaunchConfig, SaverConfig, SimulatedHost};
pub use error::SaverError;
pub use types::*;
