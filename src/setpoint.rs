// Piecewise-linear setpoint profiles sampled at a fixed step
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

use num_traits::{Float, NumCast};
use std::vec::Vec;

/// Errors raised while building a setpoint profile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetpointError {
    /// The step size is zero, negative or not finite.
    #[error("Invalid step size: must be finite and positive")]
    InvalidStep,

    /// A profile needs at least two waypoints.
    #[error("At least two waypoints are required to build a profile")]
    TooFewWaypoints,

    /// A waypoint has a non-finite time or value.
    #[error("Waypoint {index} is not finite")]
    NonFiniteWaypoint {
        /// Position of the offending waypoint.
        index: usize,
    },

    /// A segment ends at or before the time it starts.
    #[error("Segment {segment} does not move forward in time")]
    DegenerateSegment {
        /// Position of the segment, i.e. of its first waypoint.
        segment: usize,
    },

    /// The number of grid points on a segment cannot be represented or allocated.
    #[error("Segment {segment} holds too many samples for the step size")]
    TooManySamples {
        /// Position of the segment, i.e. of its first waypoint.
        segment: usize,
    },

    /// The slope and intercept computed for a segment do not reproduce its first waypoint.
    #[error("The line computed for segment {segment} does not pass through its first waypoint")]
    Inconsistent {
        /// Position of the segment, i.e. of its first waypoint.
        segment: usize,
    },
}

/// A `(time, value)` point the setpoint must pass through.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Waypoint<F: Float> {
    /// Time of the waypoint.
    pub time: F,
    /// Setpoint at that time.
    pub value: F,
}

impl<F: Float> Waypoint<F> {
    /// Creates a waypoint.
    pub fn new(time: F, value: F) -> Self {
        Self { time, value }
    }

    fn is_finite(&self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}

impl<F: Float> From<(F, F)> for Waypoint<F> {
    fn from((time, value): (F, F)) -> Self {
        Self::new(time, value)
    }
}

/// Slope-intercept form of the line through two waypoints.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line<F: Float> {
    /// Slope of the line.
    pub slope: F,
    /// Value of the line at time zero.
    pub intercept: F,
}

impl<F: Float> Line<F> {
    /// Computes the line through `start` and `end`. The intercept is solved from `end`.
    ///
    /// # Errors
    /// - `SetpointError::DegenerateSegment` if `end` is not strictly after `start`.
    pub fn through(start: Waypoint<F>, end: Waypoint<F>) -> Result<Self, SetpointError> {
        let duration = end.time - start.time;
        if duration <= F::zero() {
            return Err(SetpointError::DegenerateSegment { segment: 0 });
        }
        let slope = (end.value - start.value) / duration;
        Ok(Self {
            slope,
            intercept: end.value - slope * end.time,
        })
    }

    /// Evaluates the line at time `t`.
    pub fn at(&self, t: F) -> F {
        self.slope * t + self.intercept
    }

    /// Checks that the line passes through `point` up to a relative tolerance of `sqrt(eps)`.
    ///
    /// The tolerance is relative to the largest term of `slope * t + intercept`, so waypoints at
    /// large absolute times are not rejected for the rounding of the intercept.
    pub fn passes_through(&self, point: Waypoint<F>) -> bool {
        let scale = F::one()
            .max(point.value.abs())
            .max((self.slope * point.time).abs())
            .max(self.intercept.abs());
        (self.at(point.time) - point.value).abs() <= F::epsilon().sqrt() * scale
    }
}

/// Samples the segment from `start` to `end` every `step`, from `start.time` up to and including
/// `end.time` when it falls on the grid.
///
/// Samples are evaluated from `start` in point-slope form, so the first sample is exactly
/// `start.value`.
///
/// # Errors
/// - `SetpointError::InvalidStep` if `step` is not finite and positive.
/// - `SetpointError::NonFiniteWaypoint` if either waypoint is not finite.
/// - `SetpointError::DegenerateSegment` if `end` is not strictly after `start`.
/// - `SetpointError::Inconsistent` if the computed line misses `start`.
/// - `SetpointError::TooManySamples` if the grid points cannot be counted in a `usize` or
///   allocated.
pub fn sample_segment<F: Float>(
    step: F,
    start: Waypoint<F>,
    end: Waypoint<F>,
) -> Result<Vec<F>, SetpointError> {
    if !step.is_finite() || step <= F::zero() {
        return Err(SetpointError::InvalidStep);
    }
    for (index, point) in [start, end].iter().enumerate() {
        if !point.is_finite() {
            return Err(SetpointError::NonFiniteWaypoint { index });
        }
    }

    let line = Line::through(start, end)?;
    if !line.passes_through(start) {
        return Err(SetpointError::Inconsistent { segment: 0 });
    }

    let too_many = SetpointError::TooManySamples { segment: 0 };
    let count = ((end.time - start.time) / step)
        .floor()
        .to_usize()
        .and_then(|last| last.checked_add(1))
        .ok_or(too_many)?;

    let mut values = Vec::new();
    values.try_reserve_exact(count).map_err(|_| too_many)?;
    for i in 0..count {
        let elapsed = grid_offset::<F>(i).ok_or(too_many)? * step;
        values.push(start.value + line.slope * elapsed);
    }
    Ok(values)
}

// Grid indices are counted in `usize`; a float counter stops incrementing past its mantissa width
fn grid_offset<F: Float>(i: usize) -> Option<F> {
    <F as NumCast>::from(i)
}

/// A setpoint sequence sampled on a uniform time grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SetpointProfile<F: Float> {
    start: F,
    step: F,
    values: Vec<F>,
}

impl<F: Float> SetpointProfile<F> {
    /// Time of the first sample.
    pub fn start(&self) -> F {
        self.start
    }

    /// Time between consecutive samples.
    pub fn step(&self) -> F {
        self.step
    }

    /// The sampled setpoints.
    pub fn values(&self) -> &[F] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the profile holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample times, `start + i * step`.
    pub fn times(&self) -> impl Iterator<Item = F> + '_ {
        // usize always converts to a primitive float
        (0..self.values.len())
            .map(move |i| self.start + grid_offset::<F>(i).unwrap_or_else(F::nan) * self.step)
    }

    /// Consumes the profile, returning the sampled setpoints.
    pub fn into_values(self) -> Vec<F> {
        self.values
    }
}

/// Builds a piecewise-linear `SetpointProfile` from an ordered list of waypoints.
///
/// Each pair of consecutive waypoints is sampled with `sample_segment` and the segments are
/// concatenated, so a waypoint shared by two segments is sampled once by each of them. The
/// resulting samples are laid out on a single uniform grid starting at the first waypoint.
///
/// ```rust
/// use strejc_pid::setpoint::SetpointBuilder;
///
/// let profile = SetpointBuilder::new(1.0)
///     .expect("Invalid step")
///     .waypoint(0.0, 22.0)
///     .waypoint(45.0, 150.0)
///     .build()
///     .expect("Invalid waypoints");
/// assert_eq!(profile.len(), 46);
/// assert_eq!(profile.values()[0], 22.0);
/// ```
#[derive(Clone, Debug)]
pub struct SetpointBuilder<F: Float> {
    step: F,
    waypoints: Vec<Waypoint<F>>,
}

impl<F: Float> SetpointBuilder<F> {
    /// Starts a profile sampled every `step`.
    ///
    /// # Errors
    /// - `SetpointError::InvalidStep` if `step` is not finite and positive.
    pub fn new(step: F) -> Result<Self, SetpointError> {
        if !step.is_finite() || step <= F::zero() {
            return Err(SetpointError::InvalidStep);
        }
        Ok(Self {
            step,
            waypoints: Vec::new(),
        })
    }

    /// Appends a waypoint.
    pub fn waypoint(mut self, time: F, value: F) -> Self {
        self.waypoints.push(Waypoint::new(time, value));
        self
    }

    /// Appends several waypoints.
    pub fn waypoints<I, W>(mut self, waypoints: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<Waypoint<F>>,
    {
        self.waypoints
            .extend(waypoints.into_iter().map(Into::into));
        self
    }

    /// Samples every segment and concatenates them.
    ///
    /// Segment errors carry the position of the failing segment.
    pub fn build(&self) -> Result<SetpointProfile<F>, SetpointError> {
        if self.waypoints.len() < 2 {
            return Err(SetpointError::TooFewWaypoints);
        }
        if let Some(index) = self.waypoints.iter().position(|w| !w.is_finite()) {
            return Err(SetpointError::NonFiniteWaypoint { index });
        }

        let mut values = Vec::new();
        for (segment, pair) in self.waypoints.windows(2).enumerate() {
            let samples = sample_segment(self.step, pair[0], pair[1]).map_err(|e| match e {
                SetpointError::DegenerateSegment { .. } => {
                    SetpointError::DegenerateSegment { segment }
                }
                SetpointError::Inconsistent { .. } => SetpointError::Inconsistent { segment },
                SetpointError::TooManySamples { .. } => SetpointError::TooManySamples { segment },
                other => other,
            })?;
            values.extend(samples);
        }

        Ok(SetpointProfile {
            start: self.waypoints[0].time,
            step: self.step,
            values,
        })
    }
}
