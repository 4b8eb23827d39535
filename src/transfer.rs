// Process models that map the process variable to an actuator response
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

use crate::pid::ControlError;

/// A trait for process models the correction law can be closed around.
///
/// Any closure `Fn(F) -> F` is a process model that never fails, so an ad-hoc actuator can be
/// plugged into a `ClosedLoop` without touching the correction law.
pub trait TransferFunction<F: Float> {
    /// Returns the response magnitude of the process at the process variable `x`
    fn response(&self, x: F) -> Result<F, ControlError>;
}

impl<F: Float, T: Fn(F) -> F> TransferFunction<F> for T {
    fn response(&self, x: F) -> Result<F, ControlError> {
        Ok(self(x))
    }
}

/// Strejc's parametric process model, `g0 / (x * (1 + tau * x)^n)`.
///
/// The parameters are bound at construction and never change afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Strejc<F: Float> {
    g0: F,
    tau: F,
    n: F,
}

impl<F: Float> Strejc<F> {
    /// Creates a Strejc model with the velocity gain `g0`, the time constant `tau` and the order `n`.
    /// `n` may be fractional.
    pub fn new(g0: F, tau: F, n: F) -> Self {
        Self { g0, tau, n }
    }

    /// Returns the velocity gain.
    pub fn g0(&self) -> F {
        self.g0
    }

    /// Returns the time constant.
    pub fn tau(&self) -> F {
        self.tau
    }

    /// Returns the order of the model.
    pub fn n(&self) -> F {
        self.n
    }
}

impl<F: Float> TransferFunction<F> for Strejc<F> {
    /// # Errors
    /// - `ControlError::DivisionByZero` if `x` is zero or `(1 + tau * x)^n` vanishes.
    /// - `ControlError::NonRealResponse` if `1 + tau * x` is negative and `n` is not an integer.
    fn response(&self, x: F) -> Result<F, ControlError> {
        if x.is_zero() {
            return Err(ControlError::DivisionByZero);
        }

        let base = F::one() + self.tau * x;
        if base < F::zero() && !self.n.fract().is_zero() {
            return Err(ControlError::NonRealResponse);
        }
        if base.is_zero() && self.n < F::zero() {
            return Err(ControlError::DivisionByZero);
        }

        let denominator = x * base.powf(self.n);
        if denominator.is_zero() {
            return Err(ControlError::DivisionByZero);
        }
        Ok(self.g0 / denominator)
    }
}

/// Identity process model that hands the process variable straight back.
///
/// Useful to inspect the raw correction signal; every value it sees is traced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Passthrough;

impl<F: Float + Debug> TransferFunction<F> for Passthrough {
    fn response(&self, x: F) -> Result<F, ControlError> {
        #[cfg(feature = "std")]
        tracing::trace!(?x, "passthrough process model");
        Ok(x)
    }
}
