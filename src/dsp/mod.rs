//! Low-level DSP primitives.
//!
//! Everything here is allocation-free and realtime-safe. The pendulum state is
//! plain data advanced one sample at a time; the engine layers cross-thread
//! parameter updates and output formatting on top.

/// Driven, damped pendulum: state, parameters and the per-sample integrator.
pub mod pendulum;

pub use pendulum::{wrap_angle, PendulumParams, PendulumState};
