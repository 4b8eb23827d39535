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

use strejc_pid::data::RecordedRun;
use strejc_pid::setpoint::SetpointProfile;
use strejc_pid::sim::Trajectory;

pub const SIMULATION_HEADER: [&str; 5] = ["time", "setpoint", "value", "error", "next"];

pub const COMPARISON_HEADER: [&str; 4] = ["time", "target", "measured", "predicted"];

/// One row per setpoint: the value the step starts from, the error it sees and the value it
/// produces. The initial value sits on the first row, the final value in the last `next`.
pub fn simulation_rows(
    profile: &SetpointProfile<f64>,
    trajectory: &Trajectory<f64>,
) -> Vec<[f64; 5]> {
    let values = trajectory.values();
    profile
        .times()
        .zip(profile.values())
        .zip(trajectory.errors())
        .zip(values.windows(2))
        .map(|(((t, &setpoint), &error), pair)| [t, setpoint, pair[0], error, pair[1]])
        .collect()
}

pub fn comparison_rows(run: &RecordedRun, predicted: &[f64]) -> Vec<[f64; 4]> {
    run.target
        .samples()
        .iter()
        .zip(run.measured.samples())
        .zip(predicted)
        .map(|((target, measured), &predicted)| {
            [target.time, target.value, measured.value, predicted]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use strejc_pid::data::{Sample, Series};
    use strejc_pid::pid::{ClosedLoop, Gains};
    use strejc_pid::setpoint::SetpointBuilder;
    use strejc_pid::sim;

    #[test]
    fn test_simulation_rows_line_up() {
        let profile = SetpointBuilder::new(1.0)
            .unwrap()
            .waypoints([(0.0, 22.0), (3.0, 40.0)])
            .build()
            .unwrap();
        let closed_loop = ClosedLoop::new(Gains::proportional(0.5), |_: f64| 1.0);
        let trajectory = sim::simulate(&closed_loop, profile.values(), 20.0).unwrap();

        let rows = simulation_rows(&profile, &trajectory);
        assert_eq!(rows.len(), profile.len());

        // The initial value is written on the first row
        assert_eq!(rows[0][..4], [0.0, 22.0, 20.0, 2.0]);
        for (i, row) in rows.iter().enumerate() {
            let [t, setpoint, value, error, next] = *row;
            assert_eq!(t, i as f64);
            assert_eq!(error, setpoint - value);
            assert_eq!(next, trajectory.values()[i + 1]);
            if i > 0 {
                assert_eq!(value, rows[i - 1][4]);
            }
        }
        assert_eq!(rows[rows.len() - 1][4], trajectory.last());
    }

    #[test]
    fn test_comparison_rows_pair_samples() {
        let series = |values: &[f64]| -> Series {
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| Sample {
                    time: i as f64,
                    value,
                })
                .collect()
        };
        let run = RecordedRun::new(series(&[20.0, 30.0]), series(&[150.0, 150.0]), None);

        let rows = comparison_rows(&run, &[6.0, 4.0]);
        assert_eq!(rows, vec![[0.0, 150.0, 20.0, 6.0], [1.0, 150.0, 30.0, 4.0]]);
    }
}
