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

//! # Reciprocal mesh indexing
//!
//! Mesh-shift tables mapping 0-based mesh indices to signed wavevectors,
//! and the local k-space subdomain owned by one influence-function build.

use itertools::iproduct;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cartesian axis of the simulation box and its mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Positional index into per-axis arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-axis tables mapping a linear mesh index to its signed wavevector
/// shift in the first Brillouin zone.
///
/// For an even grid size `g` the table is `shift[0] = 0`, `shift[i] = i`
/// for `i = 1..=g/2` and `shift[g-i] = -i` for `i = 1..g/2`, so the upper
/// half of the mesh wraps to negative wavevectors and all values lie in
/// `(-g/2, g/2]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshShift {
    tables: [Vec<i32>; 3],
}

impl MeshShift {
    /// Build the shift tables for an even-sized grid.
    pub fn new(grid: [usize; 3]) -> Self {
        Self {
            tables: grid.map(Self::axis_table),
        }
    }

    fn axis_table(grid: usize) -> Vec<i32> {
        let mut shift = vec![0; grid];
        for i in 1..=grid / 2 {
            shift[i] = i as i32;
        }
        for i in 1..grid / 2 {
            shift[grid - i] = -(i as i32);
        }
        shift
    }

    /// Shift table along one axis; length equals the grid size on that axis.
    #[inline]
    pub fn table(&self, axis: Axis) -> &[i32] {
        &self.tables[axis.index()]
    }
}

/// The portion of the full reciprocal mesh owned by one process or call.
///
/// Output arrays are flattened over this domain with the last axis fastest:
/// the element for global point `n` lives at
/// `((n[0]-start[0])*size[1] + (n[1]-start[1]))*size[2] + (n[2]-start[2])`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct LocalDomain {
    /// Per-axis start offset into the full mesh.
    pub start: [usize; 3],
    /// Per-axis extent.
    pub size: [usize; 3],
}

impl LocalDomain {
    /// Domain covering the full mesh.
    pub fn full(grid: [usize; 3]) -> Self {
        Self {
            start: [0; 3],
            size: grid,
        }
    }

    /// Number of mesh points in the domain.
    #[inline]
    pub fn len(&self) -> usize {
        self.size.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&s| s == 0)
    }

    /// Flattened index of a global mesh point inside this domain.
    #[inline]
    pub fn flat_index(&self, global: [usize; 3]) -> usize {
        let x = global[0] - self.start[0];
        let y = global[1] - self.start[1];
        let z = global[2] - self.start[2];
        (x * self.size[1] + y) * self.size[2] + z
    }

    /// Iterate the domain's global mesh points in flattening order
    /// (last axis fastest).
    pub fn points(&self) -> impl Iterator<Item = [usize; 3]> {
        let [x0, y0, z0] = self.start;
        let [nx, ny, nz] = self.size;
        iproduct!(x0..x0 + nx, y0..y0 + ny, z0..z0 + nz).map(|(x, y, z)| [x, y, z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_shift_grid8() {
        let shift = MeshShift::new([8, 8, 8]);
        for axis in Axis::ALL {
            assert_eq!(shift.table(axis), &[0, 1, 2, 3, 4, -3, -2, -1]);
        }
    }

    #[test]
    fn test_mesh_shift_law() {
        // shift[i] = i for i = 1..=g/2, shift[g-i] = -i for i = 1..g/2
        let shift = MeshShift::new([6, 4, 2]);
        assert_eq!(shift.table(Axis::X), &[0, 1, 2, 3, -2, -1]);
        assert_eq!(shift.table(Axis::Y), &[0, 1, 2, -1]);
        assert_eq!(shift.table(Axis::Z), &[0, 1]);
    }

    #[test]
    fn test_domain_flattening() {
        let domain = LocalDomain {
            start: [2, 0, 4],
            size: [3, 4, 2],
        };
        assert_eq!(domain.len(), 24);
        assert!(!domain.is_empty());
        assert_eq!(domain.flat_index([2, 0, 4]), 0);
        assert_eq!(domain.flat_index([2, 0, 5]), 1);
        assert_eq!(domain.flat_index([2, 1, 4]), 2);
        assert_eq!(domain.flat_index([3, 0, 4]), 8);

        // iteration order matches the flattened index
        for (index, point) in domain.points().enumerate() {
            assert_eq!(domain.flat_index(point), index);
        }
        assert_eq!(domain.points().count(), domain.len());
    }

    #[test]
    fn test_full_domain() {
        let domain = LocalDomain::full([4, 4, 8]);
        assert_eq!(domain.len(), 128);
        assert_eq!(domain.start, [0; 3]);
    }
}
