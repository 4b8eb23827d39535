#![warn(missing_docs)]

//! # Strejc PID
//!
//! This library closes an algebraic PID correction law around a process model and simulates how
//! the process variable tracks a setpoint trajectory.
//!
//! ## Features
//!
//! - A pure, `no_std` core generic over `f32`/`f64`:
//!   - The gain law `kp + ki / x + kd * x` and the correction signal `err * gain(x)`.
//!   - The closed-loop update `correction(setpoint - x, x) * transfer(x)`.
//!   - Typed failures instead of silent infinities when the process variable is zero.
//!
//! - Pluggable process models: Strejc's `g0 / (x * (1 + tau * x)^n)`, an identity model, or any
//!   closure `Fn(F) -> F`.
//!
//! - With the `std` feature (default):
//!   - Piecewise-linear setpoint profiles sampled at a fixed step.
//!   - A sequential simulator and a sample-by-sample comparison against recorded data.
//!   - Loading and writing delimited two-column series.
//!
//! ## Usage
//!
//! ### Evaluating one step
//!
//! ```rust
//! use strejc_pid::pid::{ClosedLoop, Gains};
//! use strejc_pid::transfer::Strejc;
//!
//! let furnace = Strejc::new(1.0_f64, 0.001, 2.0);
//! let closed_loop = ClosedLoop::new(Gains::proportional(1.0), furnace);
//!
//! let next = closed_loop.step(150.0, 20.0).expect("Process variable must be nonzero");
//! assert!((next - 6.247).abs() < 1e-3);
//! ```
//!
//! ### Simulating a setpoint profile
//!
//! ```rust
//! use strejc_pid::pid::{ClosedLoop, Gains};
//! use strejc_pid::setpoint::SetpointBuilder;
//! use strejc_pid::sim;
//! use strejc_pid::transfer::Strejc;
//!
//! let profile = SetpointBuilder::new(1.0)
//!     .expect("Invalid step")
//!     .waypoints([(0.0, 22.0), (45.0, 150.0), (100.0, 150.0)])
//!     .build()
//!     .expect("Invalid waypoints");
//!
//! let closed_loop = ClosedLoop::new(Gains::proportional(1.0), Strejc::new(1.0, 0.001, 2.0));
//! let trajectory = sim::simulate(&closed_loop, profile.values(), 20.0).expect("Simulation failed");
//! assert_eq!(trajectory.values().len(), profile.len() + 1);
//! ```
//!
//! ### Plugging in your process model
//!
//! ```rust
//! use strejc_pid::pid::{ClosedLoop, Gains};
//!
//! let heater = |x: f64| 0.5 / x;
//! let closed_loop = ClosedLoop::new(Gains::new(2.0, 0.0, 0.0), heater);
//! assert_eq!(closed_loop.step(3.0, 1.0), Ok(2.0));
//! ```
//!
//! ## License
//!
#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// The algebraic PID correction law and the closed loop built on it.
pub mod pid;

/// Process models the correction law is closed around.
pub mod transfer;

/// Piecewise-linear setpoint profiles.
#[cfg(feature = "std")]
pub mod setpoint;

/// Simulation of a closed loop over a setpoint sequence, and comparison against recorded data.
#[cfg(feature = "std")]
pub mod sim;

/// Delimited text input and output of time series.
#[cfg(feature = "std")]
pub mod data;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
