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

//! # Solver configuration
//!
//! Read-only inputs for one influence-function build: mesh geometry, the
//! Ewald splitting parameter, the charge-assignment order, the precomputed
//! differential-operator arrays and the local k-space subdomain. Validation
//! happens once in [`SolverConfig::new`]; the compute kernel itself trusts
//! its inputs.

use crate::mesh::{Axis, LocalDomain};
use crate::Vector3;
use anyhow::{ensure, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Differentiation scheme used to discretize the k-space gradient.
///
/// All three approximate the same physical force with different aliasing
/// corrections; each has its own combination formula for the force and
/// energy weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Scheme {
    /// Direct multiplication by the wavevector.
    Ik,
    /// Interlaced ik, with an alternating-parity denominator.
    Iki,
    /// Analytic differentiation on the interlaced mesh.
    Adi,
}

/// Configuration of one influence-function build.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct SolverConfig {
    /// Mesh points per axis; each must be even.
    grid: [usize; 3],
    /// Axis-aligned box edge lengths.
    box_length: Vector3,
    /// Ewald splitting parameter α.
    alpha: f64,
    /// Charge-assignment order.
    cao: i32,
    /// Per-axis differential-operator coefficients, precomputed by the
    /// enclosing solver; length equals the grid size on each axis.
    d_op: [Vec<f64>; 3],
    /// Portion of the full mesh handled by this build.
    local: LocalDomain,
    /// Truncation radius of the Brillouin-zone aliasing sum.
    brillouin: i32,
}

impl SolverConfig {
    /// Aliasing-sum truncation radius used unless overridden, matching the
    /// enclosing solver's compile-time default.
    pub const DEFAULT_BRILLOUIN: i32 = 1;

    /// Validate and assemble a configuration.
    ///
    /// This is the only validation seam of the crate; numerical behavior is
    /// undefined (but non-panicking) if a configuration is forged with
    /// inconsistent fields.
    pub fn new(
        grid: [usize; 3],
        box_length: Vector3,
        alpha: f64,
        cao: i32,
        d_op: [Vec<f64>; 3],
        local: LocalDomain,
    ) -> Result<Self> {
        ensure!(
            grid.iter().all(|&g| g >= 2 && g % 2 == 0),
            "grid dimensions must be even and at least 2, got {:?}",
            grid
        );
        ensure!(
            box_length.iter().all(|&l| l > 0.0),
            "box edge lengths must be positive"
        );
        ensure!(alpha > 0.0, "ewald splitting parameter must be positive");
        ensure!(cao >= 1, "charge assignment order must be positive");
        for axis in Axis::ALL {
            ensure!(
                d_op[axis.index()].len() == grid[axis.index()],
                "differential operator along {:?} has length {}, expected {}",
                axis,
                d_op[axis.index()].len(),
                grid[axis.index()]
            );
            ensure!(
                local.start[axis.index()] + local.size[axis.index()] <= grid[axis.index()],
                "local domain exceeds the mesh along {:?}",
                axis
            );
        }
        Ok(Self {
            grid,
            box_length,
            alpha,
            cao,
            d_op,
            local,
            brillouin: Self::DEFAULT_BRILLOUIN,
        })
    }

    /// Override the aliasing-sum truncation radius (non-negative). Larger
    /// radii trade compute cost for convergence of the lattice sum.
    pub fn with_brillouin(mut self, radius: i32) -> Self {
        assert!(radius >= 0, "truncation radius must be non-negative");
        self.brillouin = radius;
        self
    }

    #[inline]
    pub fn grid(&self) -> [usize; 3] {
        self.grid
    }

    #[inline]
    pub fn box_length(&self) -> &Vector3 {
        &self.box_length
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn cao(&self) -> i32 {
        self.cao
    }

    #[inline]
    pub fn local(&self) -> &LocalDomain {
        &self.local
    }

    #[inline]
    pub fn brillouin(&self) -> i32 {
        self.brillouin
    }

    /// Differential-operator coefficient at global mesh point `n`,
    /// scaled by the box length, as a vector over the axes.
    #[inline]
    pub(crate) fn d_op_scaled(&self, n: [usize; 3]) -> Vector3 {
        Vector3::from_fn(|axis, _| self.d_op[axis][n[axis]] / self.box_length[axis])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_operator(grid: [usize; 3]) -> [Vec<f64>; 3] {
        grid.map(|g| vec![0.0; g])
    }

    fn valid() -> Result<SolverConfig> {
        SolverConfig::new(
            [8, 8, 8],
            Vector3::new(10.0, 10.0, 10.0),
            0.3,
            3,
            flat_operator([8, 8, 8]),
            LocalDomain::full([8, 8, 8]),
        )
    }

    #[test]
    fn test_valid_config() {
        let config = valid().unwrap();
        assert_eq!(config.grid(), [8, 8, 8]);
        assert_eq!(config.brillouin(), SolverConfig::DEFAULT_BRILLOUIN);
        assert_eq!(config.with_brillouin(3).brillouin(), 3);
    }

    #[test]
    fn test_rejects_odd_grid() {
        let result = SolverConfig::new(
            [8, 7, 8],
            Vector3::new(10.0, 10.0, 10.0),
            0.3,
            3,
            flat_operator([8, 7, 8]),
            LocalDomain::full([8, 7, 8]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let ok = valid().unwrap();
        let bad_alpha = SolverConfig::new(
            ok.grid(),
            *ok.box_length(),
            -0.3,
            ok.cao(),
            flat_operator(ok.grid()),
            *ok.local(),
        );
        assert!(bad_alpha.is_err());

        let bad_operator = SolverConfig::new(
            ok.grid(),
            *ok.box_length(),
            0.3,
            ok.cao(),
            [vec![0.0; 8], vec![0.0; 8], vec![0.0; 4]],
            *ok.local(),
        );
        assert!(bad_operator.is_err());

        let bad_domain = SolverConfig::new(
            ok.grid(),
            *ok.box_length(),
            0.3,
            ok.cao(),
            flat_operator(ok.grid()),
            LocalDomain {
                start: [4, 0, 0],
                size: [8, 8, 8],
            },
        );
        assert!(bad_domain.is_err());
    }
}
