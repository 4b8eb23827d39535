//! Benchmark for the closed-loop step and the simulator
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

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use strejc_pid::data::FURNACE_RECORDING_ROWS;
use strejc_pid::pid::{ClosedLoop, Gains};
use strejc_pid::setpoint::SetpointBuilder;
use strejc_pid::sim;
use strejc_pid::transfer::Strejc;

fn make_loop() -> ClosedLoop<f64, Strejc<f64>> {
    ClosedLoop::new(Gains::new(1.0, 0.5, 0.1), Strejc::new(1.0, 0.001, 2.0))
}

/// A single step is a handful of flops plus one `powf`, so it should take nanoseconds.
fn bench_step(c: &mut Criterion) {
    let closed_loop = make_loop();
    let mut measurement = 20.0;

    c.bench_function("closed-loop step", |b| {
        b.iter(|| {
            let output = closed_loop.step(black_box(150.0), black_box(measurement));
            measurement += 0.0001; // prevent constant inputs
            black_box(output)
        });
    });
}

// Simulating the furnace profile is a sequential scan, it cannot do better than one step per
// setpoint plus the allocation of the trajectory.
fn bench_simulation(c: &mut Criterion) {
    let closed_loop = make_loop();
    let profile = SetpointBuilder::new(1.0)
        .and_then(|b| {
            b.waypoints([(0.0, 22.0), (45.0, 150.0), (100.0, 150.0)])
                .build()
        })
        .unwrap();

    c.bench_function("furnace simulation", |b| {
        b.iter(|| black_box(sim::simulate(&closed_loop, black_box(profile.values()), 20.0)));
    });
}

fn bench_comparison(c: &mut Criterion) {
    let closed_loop = make_loop();
    let setpoints = vec![150.0; FURNACE_RECORDING_ROWS];
    let measurements: Vec<f64> = (0..FURNACE_RECORDING_ROWS)
        .map(|i| 20.0 + 0.07 * i as f64)
        .collect();

    c.bench_function("recorded data comparison", |b| {
        b.iter(|| {
            black_box(sim::compare(
                &closed_loop,
                black_box(&setpoints),
                black_box(&measurements),
            ))
        });
    });
}

criterion_group!(benches, bench_step, bench_simulation, bench_comparison);
criterion_main!(benches);
