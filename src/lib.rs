//! HazardMon firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alert;
pub mod app;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod hazard;
pub mod pins;
pub mod presenter;
pub mod telemetry;

// Hardware-facing modules compile on every target; the real
// implementations are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;
pub mod sensors;
