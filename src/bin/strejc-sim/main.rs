//! `strejc-sim`: runs a PID correction law closed around a Strejc process model, either over a
//! synthetic setpoint profile or over recorded furnace data, and writes the series as
//! tab-separated text for plotting.

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

mod cli;
mod output;
mod scenario;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use strejc_pid::data::{self, RecordedRun};
use strejc_pid::pid::ClosedLoop;
use strejc_pid::sim;

use cli::{Cli, Commands, CommonArgs};
use scenario::Scenario;

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate { common } => run_simulate(&common),
        Commands::Compare {
            common,
            measured,
            target,
            rows,
        } => run_compare(&common, &measured, &target, rows),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run_simulate(args: &CommonArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let profile = scenario.profile()?;
    let initial = scenario.initial()?;
    let closed_loop = ClosedLoop::new(scenario.gains(args), scenario.model());

    tracing::info!(
        gains = ?closed_loop.gains().gains(),
        model = ?closed_loop.transfer(),
        steps = profile.len(),
        initial,
        "simulating"
    );
    let trajectory = sim::simulate(&closed_loop, profile.values(), initial)?;

    data::write_series(
        open_output(args.output.as_deref())?,
        &output::SIMULATION_HEADER,
        output::simulation_rows(&profile, &trajectory),
    )
    .context("Failed to write the trajectory")?;

    tracing::info!(last = trajectory.last(), "simulation written");
    Ok(())
}

fn run_compare(args: &CommonArgs, measured: &Path, target: &Path, rows: usize) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let closed_loop = ClosedLoop::new(scenario.gains(args), scenario.model());

    let run = RecordedRun::load(measured, target, Some(rows))?;
    tracing::info!(
        gains = ?closed_loop.gains().gains(),
        samples = run.len(),
        "comparing against recorded data"
    );

    let setpoints = run.target.values();
    let measurements = run.measured.values();
    let predicted = sim::compare(&closed_loop, &setpoints, &measurements)?;

    data::write_series(
        open_output(args.output.as_deref())?,
        &output::COMPARISON_HEADER,
        output::comparison_rows(&run, &predicted),
    )
    .context("Failed to write the comparison")?;
    Ok(())
}
