//! Pole finding on a disk-shaped domain.
//!
//! Searches `f(z) = 1 / ((z - 0.5)(z + 0.5))` on the unit disk and dumps the
//! final mesh as plot data (vertex count per quadrant).
//!
//! Run with: cargo run --example `disk_poles`

use grpf::{
    disk_domain, grpf_with_diagnostics, Complex64, Parameters, PlotData, Quadrant,
};

fn main() -> grpf::Result<()> {
    env_logger::init();

    let points = disk_domain(Complex64::new(0.0, 0.0), 1.0, 0.05);
    let params = Parameters {
        tolerance: 1e-9,
        ..Parameters::default()
    };

    let (result, diagnostics) = grpf_with_diagnostics(
        |z| 1.0 / ((z - 0.5) * (z + 0.5)),
        &points,
        &params,
    )?;

    println!("roots: {:?}", result.roots);
    println!("poles: {:?}", result.poles);

    let plot = PlotData::from_diagnostics(&diagnostics);
    for quadrant in [
        Quadrant::First,
        Quadrant::Second,
        Quadrant::Third,
        Quadrant::Fourth,
        Quadrant::Node,
    ] {
        let count = plot.quadrants.iter().filter(|&&q| q == quadrant).count();
        println!("{quadrant:?}: {count} vertices");
    }
    Ok(())
}
