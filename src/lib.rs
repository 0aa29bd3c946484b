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

//! # P3M influence function
//!
//! Construction of the optimal influence (Green's) function of Hockney and
//! Eastwood for particle-particle particle-mesh (P3M) Ewald electrostatics.
//! The influence function is a per-mesh-point weight which, multiplied
//! against the Fourier-transformed charge density, yields the long-range
//! force and energy contributions in periodic particle simulations.
//!
//! The crate covers the reciprocal-space core only: mesh-shift indexing,
//! the truncated Brillouin-zone aliasing sums for the ik, interlaced-ik
//! and analytic differentiation schemes, and the assembly of the per-point
//! force and energy weight arrays. Fourier transform execution, charge
//! assignment, near-field corrections and parameter tuning belong to the
//! enclosing solver and are consumed here as read-only inputs.

#[cfg(test)]
extern crate approx;

use num::traits::FloatConst;
use num::Float;

/// A point in 3D space
pub type Vector3 = nalgebra::Vector3<f64>;

pub mod influence;
pub mod mesh;
pub mod solver;

pub use influence::InfluenceFunction;
pub use mesh::{Axis, LocalDomain, MeshShift};
pub use solver::{Scheme, SolverConfig};

/// Normalized sinc function, sin(πx)/(πx), with sinc(0) = 1.
///
/// This is the Fourier transform of the charge-assignment window; raised
/// to the power 2·cao it gives the per-axis aliasing weight.
pub(crate) fn sinc<T: Float + FloatConst>(x: T) -> T {
    if x.is_zero() {
        T::one()
    } else {
        let arg = T::PI() * x;
        arg.sin() / arg
    }
}
