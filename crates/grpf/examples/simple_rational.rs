//! Roots and poles of a rational function with multiplicities.
//!
//! Finds the zeros and the pole of
//! `f(z) = (z - 1)(z - i)^2 (z + 1)^3 / (z + i)`
//! on the square [-2, 2] x [-2, 2] and prints each location with its
//! winding number.
//!
//! Run with: cargo run --example `simple_rational`

use grpf::{grpf_with_diagnostics, rectangular_domain, Complex64, Parameters};

fn f(z: Complex64) -> Complex64 {
    let i = Complex64::i();
    (z - 1.0) * (z - i).powu(2) * (z + 1.0).powu(3) / (z + i)
}

fn main() -> grpf::Result<()> {
    env_logger::init();

    let points = rectangular_domain(
        Complex64::new(-2.0, -2.0),
        Complex64::new(2.0, 2.0),
        0.1,
    );
    let params = Parameters::default();

    let (result, diagnostics) = grpf_with_diagnostics(f, &points, &params)?;

    println!(
        "{:?} after {} passes, {} mesh vertices",
        result.outcome, result.iterations, result.vertex_count
    );
    for region in &diagnostics.regions {
        let kind = if region.winding > 0 { "root" } else { "pole" };
        println!(
            "{kind} at {:.12} (winding {})",
            region.location, region.winding
        );
    }
    Ok(())
}
