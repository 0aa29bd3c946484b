//! Compare the three differentiation schemes along one mesh axis.
//!
//! Builds the influence function for an 8x8x8 mesh and prints the force
//! and energy weights of the points (n, 0, 0).
//!
//! Run with: `cargo run --example influence`

use anyhow::Result;
use p3m_influence::{Axis, InfluenceFunction, LocalDomain, MeshShift, Scheme, SolverConfig, Vector3};

fn main() -> Result<()> {
    let grid = [8, 8, 8];

    // The ik differential operator: the mesh-shifted wavevector itself.
    let shift = MeshShift::new(grid);
    let d_op = Axis::ALL.map(|axis| shift.table(axis).iter().map(|&s| f64::from(s)).collect());

    let config = SolverConfig::new(
        grid,
        Vector3::new(10.0, 10.0, 10.0), // box edges in Å
        0.3,                            // Ewald splitting parameter
        3,                              // charge-assignment order
        d_op,
        LocalDomain::full(grid),
    )?
    .with_brillouin(2);

    let ik = InfluenceFunction::compute(&config, Scheme::Ik)?;
    let iki = InfluenceFunction::compute(&config, Scheme::Iki)?;
    let adi = InfluenceFunction::compute(&config, Scheme::Adi)?;

    println!(
        "{:>3} {:>14} {:>14} {:>14} {:>14}",
        "n", "ik force", "ik energy", "iki force", "adi force"
    );
    for n in 0..grid[0] {
        let index = config.local().flat_index([n, 0, 0]);
        println!(
            "{:>3} {:>14.6e} {:>14.6e} {:>14.6e} {:>14.6e}",
            n,
            ik.force()[index],
            ik.energy()[index],
            iki.force()[index],
            adi.force()[index]
        );
    }
    Ok(())
}
