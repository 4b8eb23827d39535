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

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use strejc_pid::data::FURNACE_RECORDING_ROWS;

#[derive(Parser)]
#[command(name = "strejc-sim")]
#[command(version, about = "Simulate a PID correction law closed around a Strejc process model")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate the loop over the setpoint profile of a scenario
    Simulate {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Evaluate the loop over recorded setpoint/measurement pairs
    Compare {
        #[command(flatten)]
        common: CommonArgs,

        /// Two-column file of measured values
        #[arg(long)]
        measured: PathBuf,

        /// Two-column file of target values
        #[arg(long)]
        target: PathBuf,

        /// Number of rows to keep from the recordings
        #[arg(long, default_value_t = FURNACE_RECORDING_ROWS)]
        rows: usize,
    },
}

#[derive(Args)]
pub struct CommonArgs {
    /// Scenario file (TOML)
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Output file, stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the proportional gain
    #[arg(long, allow_negative_numbers = true)]
    pub kp: Option<f64>,

    /// Override the integral gain
    #[arg(long, allow_negative_numbers = true)]
    pub ki: Option<f64>,

    /// Override the derivative gain
    #[arg(long, allow_negative_numbers = true)]
    pub kd: Option<f64>,
}
