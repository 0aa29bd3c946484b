// Copyright 2024 The p3m-influence developers
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! # Influence function assembly
//!
//! Builds the optimal influence function of Hockney and Eastwood for
//! force and energy calculations over the local k-space subdomain.
//!
//! See Hockney/Eastwood 8-22 (p. 275); note the somewhat different
//! convention for the prefactors, which is described in Deserno/Holm,
//! doi:10.1063/1.477414.

pub mod aliasing;

use crate::mesh::MeshShift;
use crate::solver::{Scheme, SolverConfig};
use aliasing::{aliasing_sums, Adi, AliasingScheme, Ik, Iki};
use anyhow::{Context, Result};
use log::debug;

/// Per-mesh-point force and energy weights over one local subdomain.
///
/// Both arrays are flattened in the subdomain's index order (last axis
/// fastest) and fully overwritten on every build; a configuration change
/// (grid, alpha, cao or box geometry) requires computing a fresh value
/// rather than mutating an old one.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceFunction {
    force: Vec<f64>,
    energy: Vec<f64>,
}

impl InfluenceFunction {
    /// Compute the influence function for the given differentiation scheme.
    ///
    /// The only failure mode is allocation of the output arrays; every
    /// other precondition is validated by [`SolverConfig::new`].
    pub fn compute(config: &SolverConfig, scheme: Scheme) -> Result<Self> {
        match scheme {
            Scheme::Ik => Self::compute_with::<Ik>(config),
            Scheme::Iki => Self::compute_with::<Iki>(config),
            Scheme::Adi => Self::compute_with::<Adi>(config),
        }
    }

    /// Compute the influence function with a statically selected scheme.
    ///
    /// Every point of the local subdomain is a pure function of the
    /// configuration; points sitting at the zero or Nyquist frequency on
    /// all three axes simultaneously are set to zero, which both defines
    /// away the ill-posed self term and keeps the zero wavevector out of
    /// the aliasing sums.
    pub fn compute_with<S: AliasingScheme>(config: &SolverConfig) -> Result<Self> {
        let local = config.local();
        debug!(
            "building influence function over {} local mesh points",
            local.len()
        );
        let shift = MeshShift::new(config.grid());
        let mut force = Vec::new();
        force
            .try_reserve_exact(local.len())
            .context("allocating influence-function force array")?;
        let mut energy = Vec::new();
        energy
            .try_reserve_exact(local.len())
            .context("allocating influence-function energy array")?;

        // Push order equals the domain's flattening order.
        for n in local.points() {
            let (f, e) = if is_degenerate(config, n) {
                (0.0, 0.0)
            } else {
                let sums = aliasing_sums::<S>(config, &shift, n);
                S::combine(config, n, &sums)
            };
            force.push(f);
            energy.push(e);
        }
        debug!("influence function finished");
        Ok(Self { force, energy })
    }

    /// Force weights, one per local mesh point.
    #[inline]
    pub fn force(&self) -> &[f64] {
        &self.force
    }

    /// Energy weights, one per local mesh point.
    #[inline]
    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    /// Number of local mesh points covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.force.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }
}

/// A point sitting at the zero or Nyquist frequency on all three axes
/// simultaneously, where the standard formula is singular.
#[inline]
fn is_degenerate(config: &SolverConfig, n: [usize; 3]) -> bool {
    let grid = config.grid();
    (0..3).all(|axis| n[axis] % (grid[axis] / 2) == 0)
}
