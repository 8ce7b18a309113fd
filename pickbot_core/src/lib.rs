#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core dispatch logic (transport-agnostic).
//!
//! This crate turns a slot id into a delivered motion program. All network
//! interaction goes through the `pickbot_traits::Transport` trait.
//!
//! ## Architecture
//!
//! - **Calibration**: immutable per-dispatch snapshot of the cell geometry
//!   (`calibration` module, populated from `pickbot_config`)
//! - **Grid**: slot → controller-frame coordinate resolution (`grid` module)
//! - **Script**: typed template rendering of the motion program (`script`)
//! - **Dispatch**: the strictly ordered two-channel delivery (`dispatch`)
//! - **Runner**: background execution with a result channel (`runner`)
//!
//! ## Numeric formatting
//!
//! The controller's interpreter parses literals with a fixed grammar, so all
//! emitted numbers use an invariant decimal point: coordinates at exactly
//! three decimals, dynamics constants at up to three (trailing zeros
//! trimmed). See `script::fmt_coord` and `script::fmt_dynamic`.

pub mod calibration;
pub mod conversions;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod mocks;
pub mod runner;
pub mod script;

pub use calibration::Calibration;
pub use dispatch::{BRAKE_RELEASE, dispatch_slot};
pub use error::{DispatchError, Result};
pub use grid::{Coordinate, SlotId, resolve_pick_coordinate, resolve_shipment_coordinate};
pub use script::{MotionProgram, compile_program};
