//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the monitoring loop for the HazardMon system:
//! sensing, hazard classification, alerting, connectivity gating and
//! telemetry.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
