// Algebraic PID correction law and the closed-loop update around a process model
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

use num_traits::Float;

use crate::transfer::TransferFunction;

/// Errors raised while evaluating the correction law or a process model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ControlError {
    /// The process variable, or a denominator of the process model, is zero.
    #[cfg_attr(
        feature = "std",
        error("Division by zero: the process variable must be nonzero")
    )]
    DivisionByZero,

    /// The process model raised a negative base to a fractional power.
    #[cfg_attr(
        feature = "std",
        error("The process model response is not a real number")
    )]
    NonRealResponse,
}

/// The proportional, integral and derivative constants of the correction law.
///
/// The gains are used algebraically: the integral term scales with `1 / x` and the derivative term
/// with `x`, nothing is accumulated over time. Any real value is accepted, including zero and
/// negative gains.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gains<F: Float> {
    kp: F,
    ki: F,
    kd: F,
}

impl<F: Float> Gains<F> {
    /// Creates a gain triple.
    pub fn new(kp: F, ki: F, kd: F) -> Self {
        Self { kp, ki, kd }
    }

    /// Creates a purely proportional gain triple, i.e. `ki = kd = 0`.
    pub fn proportional(kp: F) -> Self {
        Self::new(kp, F::zero(), F::zero())
    }

    /// Returns the proportional gain.
    pub fn kp(&self) -> F {
        self.kp
    }

    /// Returns the integral gain.
    pub fn ki(&self) -> F {
        self.ki
    }

    /// Returns the derivative gain.
    pub fn kd(&self) -> F {
        self.kd
    }

    /// Convenience method that returns the proportional, integral, and derivative gains together as a tuple.
    pub fn gains(&self) -> (F, F, F) {
        (self.kp, self.ki, self.kd)
    }

    /// Sets the proportional gain.
    pub fn set_kp(&mut self, kp: F) {
        self.kp = kp;
    }

    /// Sets the integral gain.
    pub fn set_ki(&mut self, ki: F) {
        self.ki = ki;
    }

    /// Sets the derivative gain.
    pub fn set_kd(&mut self, kd: F) {
        self.kd = kd;
    }

    /// Computes the effective gain `kp + ki / x + kd * x` at the process variable `x`.
    ///
    /// # Errors
    /// - `ControlError::DivisionByZero` if `x` is zero, whatever the value of `ki`.
    pub fn gain(&self, x: F) -> Result<F, ControlError> {
        if x.is_zero() {
            return Err(ControlError::DivisionByZero);
        }
        Ok(self.kp + self.ki / x + self.kd * x)
    }

    /// Computes the correction signal `err * gain(x)`.
    ///
    /// `err` is usually `setpoint - x` but any value is accepted.
    pub fn correction(&self, err: F, x: F) -> Result<F, ControlError> {
        Ok(err * self.gain(x)?)
    }
}

/// Computes the closed-loop update `correction(setpoint - x, x) * transfer(x)`.
///
/// The gain law is evaluated before the process model, so a zero process variable always surfaces
/// as `ControlError::DivisionByZero` from the gain law. Errors raised by the process model are
/// propagated unchanged.
pub fn closed_loop_step<F, T>(
    setpoint: F,
    x: F,
    transfer: &T,
    gains: &Gains<F>,
) -> Result<F, ControlError>
where
    F: Float,
    T: TransferFunction<F> + ?Sized,
{
    let correction = gains.correction(setpoint - x, x)?;
    Ok(correction * transfer.response(x)?)
}

/// A correction law closed around a process model.
///
/// This struct pairs a set of gains with the model of the actuator/process they drive. It holds
/// no mutable state: `step` is a pure function of the setpoint and the process variable, so the
/// same loop can drive a sequential simulation or be evaluated sample-by-sample over recorded
/// data.
#[derive(Clone, Debug)]
pub struct ClosedLoop<F: Float, T: TransferFunction<F>> {
    gains: Gains<F>,
    transfer: T,
}

impl<F: Float, T: TransferFunction<F>> ClosedLoop<F, T> {
    /// Closes the correction law given by `gains` around the process model `transfer`.
    pub fn new(gains: Gains<F>, transfer: T) -> Self {
        Self { gains, transfer }
    }

    /// Returns the gains of the correction law.
    pub fn gains(&self) -> &Gains<F> {
        &self.gains
    }

    /// Returns the gains mutably, to retune the loop between runs.
    pub fn gains_mut(&mut self) -> &mut Gains<F> {
        &mut self.gains
    }

    /// Returns the process model.
    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    /// Evaluates the closed-loop update at the process variable `x` for the given setpoint.
    pub fn step(&self, setpoint: F, x: F) -> Result<F, ControlError> {
        closed_loop_step(setpoint, x, &self.transfer, &self.gains)
    }
}
