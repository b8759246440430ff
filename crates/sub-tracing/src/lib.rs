// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Installs a `tracing` subscriber for the spans and events the tessera
//! crates emit.

pub mod builder;
mod error;
pub mod factory;
mod subsystem;

pub use builder::{Format, TracingBuilder};
pub use error::TracingError;
pub use factory::TracingSubsystemFactory;
pub use subsystem::TracingSubsystem;
