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

//! # Brillouin-zone aliasing sums
//!
//! A discrete mesh cannot represent the continuous Fourier transform
//! exactly; the optimal influence function therefore sums window-function
//! and damping terms over periodic images of each reciprocal mesh point,
//! truncated to a small radius. The three differentiation schemes share
//! one image loop and differ only in how each image folds into their
//! numerator and denominator accumulators, expressed here as the
//! [`AliasingScheme`] strategy.

use crate::mesh::{Axis, MeshShift};
use crate::sinc;
use crate::solver::SolverConfig;
use crate::Vector3;
use itertools::iproduct;
use std::f64::consts::{FRAC_1_PI, FRAC_2_PI, PI};

/// One periodic-image contribution, shared by all schemes.
pub struct ImageTerm {
    /// Product over axes of sinc(nm/g)^(2·cao).
    pub weight: f64,
    /// Gaussian damping exp(-(π/α)²·nm²).
    pub damping: f64,
    /// Shifted wavevector divided by the box edge lengths.
    pub scaled: Vector3,
    /// Squared magnitude of `scaled`. Non-zero for every image the
    /// builder feeds through here; the zero wavevector is handled by the
    /// degenerate-point branch before the sum is entered.
    pub norm2: f64,
    /// Whether the image offset parity mx+my+mz is even.
    pub even: bool,
}

/// Per-image accumulation policy and combination formula of one
/// differentiation scheme.
pub trait AliasingScheme {
    /// Scheme-specific numerator/denominator accumulators.
    type Sums: Default;

    /// Fold one periodic image into the accumulators.
    fn accumulate(sums: &mut Self::Sums, term: &ImageTerm);

    /// Combine the accumulated sums into the (force, energy) weights of
    /// the global mesh point `n`.
    fn combine(config: &SolverConfig, n: [usize; 3], sums: &Self::Sums) -> (f64, f64);
}

/// Precomputed per-axis factors of one image offset.
struct AxisTerm {
    /// Image offset m along this axis.
    image: i32,
    /// Shifted wavevector index over the box edge length.
    scaled: f64,
    /// sinc(nm/g)^(2·cao).
    weight: f64,
}

fn axis_terms(config: &SolverConfig, shift: &MeshShift, axis: Axis, n: usize) -> Vec<AxisTerm> {
    let grid = config.grid()[axis.index()];
    let box_length = config.box_length()[axis.index()];
    let radius = config.brillouin();
    (-radius..=radius)
        .map(|image| {
            let nm = f64::from(shift.table(axis)[n] + grid as i32 * image);
            AxisTerm {
                image,
                scaled: nm / box_length,
                weight: sinc(nm / grid as f64).powi(2 * config.cao()),
            }
        })
        .collect()
}

/// Run the truncated `(2R+1)³` image sum for one non-degenerate mesh
/// point, folding each image through the scheme's accumulator.
pub fn aliasing_sums<S: AliasingScheme>(
    config: &SolverConfig,
    shift: &MeshShift,
    n: [usize; 3],
) -> S::Sums {
    let damping_prefactor = (PI / config.alpha()).powi(2);
    let x_terms = axis_terms(config, shift, Axis::X, n[0]);
    let y_terms = axis_terms(config, shift, Axis::Y, n[1]);
    let z_terms = axis_terms(config, shift, Axis::Z, n[2]);

    let mut sums = S::Sums::default();
    for (x, y, z) in iproduct!(&x_terms, &y_terms, &z_terms) {
        let scaled = Vector3::new(x.scaled, y.scaled, z.scaled);
        let norm2 = scaled.norm_squared();
        let term = ImageTerm {
            weight: x.weight * y.weight * z.weight,
            damping: (-damping_prefactor * norm2).exp(),
            scaled,
            norm2,
            even: (x.image + y.image + z.image) % 2 == 0,
        };
        S::accumulate(&mut sums, &term);
    }
    sums
}

/// Direct ik differentiation: force from multiplication by the wavevector.
pub struct Ik;

/// Accumulators of the ik scheme.
#[derive(Clone, Copy, Debug)]
pub struct IkSums {
    pub numerator_force: Vector3,
    pub numerator_energy: f64,
    pub denominator: f64,
}

impl Default for IkSums {
    fn default() -> Self {
        Self {
            numerator_force: Vector3::zeros(),
            numerator_energy: 0.0,
            denominator: 0.0,
        }
    }
}

impl AliasingScheme for Ik {
    type Sums = IkSums;

    fn accumulate(sums: &mut IkSums, term: &ImageTerm) {
        let prefactor = term.weight * term.damping / term.norm2;
        sums.numerator_energy += prefactor;
        sums.numerator_force += prefactor * term.scaled;
        sums.denominator += term.weight;
    }

    fn combine(config: &SolverConfig, n: [usize; 3], sums: &IkSums) -> (f64, f64) {
        let d_op = config.d_op_scaled(n);
        let fak1 = d_op.dot(&sums.numerator_force);
        let fak2 = d_op.norm_squared();
        let force = FRAC_2_PI * fak1 / (fak2 * sums.denominator.powi(2));
        // The implemented energy convention; see Hockney/Eastwood 8-22.
        (force, 0.5 * force)
    }
}

/// Interlaced ik differentiation; adds an alternating-parity denominator
/// over the two interlaced sub-meshes.
pub struct Iki;

/// Accumulators of the iki scheme.
#[derive(Clone, Copy, Debug)]
pub struct IkiSums {
    pub numerator_force: Vector3,
    pub numerator_energy: f64,
    pub denominator: [f64; 2],
}

impl Default for IkiSums {
    fn default() -> Self {
        Self {
            numerator_force: Vector3::zeros(),
            numerator_energy: 0.0,
            denominator: [0.0; 2],
        }
    }
}

impl AliasingScheme for Iki {
    type Sums = IkiSums;

    fn accumulate(sums: &mut IkiSums, term: &ImageTerm) {
        let prefactor = term.weight * term.damping / term.norm2;
        sums.numerator_energy += prefactor;
        sums.numerator_force += prefactor * term.scaled;
        sums.denominator[0] += term.weight;
        if term.even {
            sums.denominator[1] += term.weight;
        } else {
            sums.denominator[1] -= term.weight;
        }
    }

    fn combine(config: &SolverConfig, n: [usize; 3], sums: &IkiSums) -> (f64, f64) {
        let d_op = config.d_op_scaled(n);
        let fak1 = d_op.dot(&sums.numerator_force);
        let fak2 = d_op.norm_squared();
        let denominator2 = 0.5 * (sums.denominator[0].powi(2) + sums.denominator[1].powi(2));
        let force = FRAC_2_PI * fak1 / (fak2 * denominator2);
        let energy = FRAC_1_PI * sums.numerator_energy / sums.denominator[0].powi(2);
        (force, energy)
    }
}

/// Analytic differentiation on the interlaced mesh; the damping term is
/// not divided by nm² in the force numerator, and four denominators split
/// by image parity enter the combination.
pub struct Adi;

/// Accumulators of the adi scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdiSums {
    pub numerator_force: f64,
    pub numerator_energy: f64,
    pub denominator: [f64; 4],
}

impl AliasingScheme for Adi {
    type Sums = AdiSums;

    fn accumulate(sums: &mut AdiSums, term: &ImageTerm) {
        let prefactor = term.weight * term.damping;
        sums.numerator_force += prefactor;
        sums.numerator_energy += prefactor / term.norm2;
        sums.denominator[0] += term.weight;
        sums.denominator[1] += term.weight * term.norm2;
        if term.even {
            sums.denominator[2] += term.weight;
            sums.denominator[3] += term.weight * term.norm2;
        } else {
            sums.denominator[2] -= term.weight;
            sums.denominator[3] -= term.weight * term.norm2;
        }
    }

    fn combine(_config: &SolverConfig, _n: [usize; 3], sums: &AdiSums) -> (f64, f64) {
        let [d0, d1, d2, d3] = sums.denominator;
        let force = sums.numerator_force / (0.5 * PI * (d0 * d1 + d2 * d3));
        let energy = FRAC_1_PI * sums.numerator_energy / d0.powi(2);
        (force, energy)
    }
}
