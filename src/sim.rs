// Drives a closed loop over a setpoint sequence
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use core::fmt::Debug;

use num_traits::Float;
use std::vec::Vec;

use crate::pid::{ClosedLoop, ControlError};
use crate::transfer::TransferFunction;

/// A closed-loop step failed part-way through a simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Closed-loop step {step} failed")]
pub struct SimulationError {
    /// Index of the setpoint whose step failed.
    pub step: usize,
    /// The underlying failure.
    #[source]
    pub source: ControlError,
}

/// Errors raised while evaluating a loop over recorded data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// The two sequences cannot be paired.
    #[error("Cannot pair {setpoints} setpoints with {measurements} measurements")]
    LengthMismatch {
        /// Number of setpoint samples.
        setpoints: usize,
        /// Number of measurement samples.
        measurements: usize,
    },

    /// The step at `index` failed.
    #[error("Closed-loop step failed at sample {index}")]
    Step {
        /// Index of the failing sample.
        index: usize,
        /// The underlying failure.
        #[source]
        source: ControlError,
    },
}

/// The response of a simulated closed loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<F: Float> {
    values: Vec<F>,
    errors: Vec<F>,
}

impl<F: Float> Trajectory<F> {
    /// Process variable over time; the first value is the initial condition, so there is one more
    /// value than setpoints.
    pub fn values(&self) -> &[F] {
        &self.values
    }

    /// Tracking error `setpoint - value` seen by each step.
    pub fn errors(&self) -> &[F] {
        &self.errors
    }

    /// The initial process variable.
    pub fn initial(&self) -> F {
        self.values[0]
    }

    /// The process variable after the last step.
    pub fn last(&self) -> F {
        self.values[self.values.len() - 1]
    }

    /// Number of steps simulated.
    pub fn steps(&self) -> usize {
        self.errors.len()
    }
}

/// Simulates the loop from `initial` over `setpoints`, feeding each step's output back as the
/// next process variable.
///
/// The run stops at the first failing step.
pub fn simulate<F, T>(
    closed_loop: &ClosedLoop<F, T>,
    setpoints: &[F],
    initial: F,
) -> Result<Trajectory<F>, SimulationError>
where
    F: Float + Debug,
    T: TransferFunction<F>,
{
    let mut values = Vec::with_capacity(setpoints.len() + 1);
    let mut errors = Vec::with_capacity(setpoints.len());
    values.push(initial);

    let mut x = initial;
    for (step, &setpoint) in setpoints.iter().enumerate() {
        errors.push(setpoint - x);
        x = closed_loop
            .step(setpoint, x)
            .map_err(|source| SimulationError { step, source })?;
        tracing::trace!(step, ?setpoint, value = ?x, "closed-loop step");
        values.push(x);
    }

    tracing::debug!(
        steps = setpoints.len(),
        initial = ?initial,
        last = ?x,
        "simulation finished"
    );
    Ok(Trajectory { values, errors })
}

/// Evaluates the loop sample-by-sample over recorded setpoints and measurements.
///
/// Each output depends only on its own pair of samples, unlike `simulate` which feeds outputs back.
pub fn compare<F, T>(
    closed_loop: &ClosedLoop<F, T>,
    setpoints: &[F],
    measurements: &[F],
) -> Result<Vec<F>, CompareError>
where
    F: Float,
    T: TransferFunction<F>,
{
    if setpoints.len() != measurements.len() {
        return Err(CompareError::LengthMismatch {
            setpoints: setpoints.len(),
            measurements: measurements.len(),
        });
    }

    let predicted = setpoints
        .iter()
        .zip(measurements)
        .enumerate()
        .map(|(index, (&setpoint, &x))| {
            closed_loop
                .step(setpoint, x)
                .map_err(|source| CompareError::Step { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(samples = predicted.len(), "compared loop against recorded data");
    Ok(predicted)
}
