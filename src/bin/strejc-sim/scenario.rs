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

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use strejc_pid::pid::Gains;
use strejc_pid::setpoint::{SetpointBuilder, SetpointProfile};
use strejc_pid::transfer::Strejc;

use crate::cli::CommonArgs;

/// Offset of the default initial process variable below the first waypoint.
const INITIAL_OFFSET: f64 = 2.0;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub gains: GainsConfig,
    pub model: ModelConfig,
    pub setpoint: SetpointConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GainsConfig {
    pub kp: f64,
    #[serde(default)]
    pub ki: f64,
    #[serde(default)]
    pub kd: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ModelConfig {
    pub g0: f64,
    pub tau: f64,
    pub n: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetpointConfig {
    pub step: f64,
    pub waypoints: Vec<[f64; 2]>,
    #[serde(default)]
    pub initial: Option<f64>,
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Gains of the scenario, with command line overrides applied
    pub fn gains(&self, args: &CommonArgs) -> Gains<f64> {
        Gains::new(
            args.kp.unwrap_or(self.gains.kp),
            args.ki.unwrap_or(self.gains.ki),
            args.kd.unwrap_or(self.gains.kd),
        )
    }

    pub fn model(&self) -> Strejc<f64> {
        Strejc::new(self.model.g0, self.model.tau, self.model.n)
    }

    pub fn profile(&self) -> Result<SetpointProfile<f64>> {
        let profile = SetpointBuilder::new(self.setpoint.step)?
            .waypoints(self.setpoint.waypoints.iter().map(|&[t, v]| (t, v)))
            .build()
            .context("Failed to build the setpoint profile")?;
        Ok(profile)
    }

    /// Initial process variable; defaults to just below the first waypoint
    pub fn initial(&self) -> Result<f64> {
        match (self.setpoint.initial, self.setpoint.waypoints.first()) {
            (Some(initial), _) => Ok(initial),
            (None, Some(&[_, value])) => Ok(value - INITIAL_OFFSET),
            (None, None) => anyhow::bail!("The scenario has no waypoints"),
        }
    }
}
