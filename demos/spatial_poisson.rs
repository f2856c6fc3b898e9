//! Demonstration of a Poisson hyperplane tessellation of a box in 3D.

use tessera::{AnyTessellation, ConvexRegion, ProcessKind, TessellationConfig};

fn main() {
    let config = TessellationConfig {
        kind: ProcessKind::Poisson,
        dim: 3,
        bounds: Some((vec![0.0, 0.0, 0.0], vec![2.0, 1.0, 1.0])),
        param: Some(4.0),
        seed: Some(7),
        ..TessellationConfig::default()
    };

    let engine = match config.run() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Run failed: {}", e);
            return;
        }
    };

    let AnyTessellation::Spatial(engine) = &engine else {
        eprintln!("Expected a spatial tessellation");
        return;
    };
    let Some(result) = engine.result() else {
        return;
    };

    println!("=== Poisson hyperplanes in [0,2]x[0,1]x[0,1] (lam = 4) ===");
    println!("Domain volume: {:.6}", engine.domain().measure());
    println!("Hyperplanes:   {}", result.hyperplane_count());
    println!("Cells:         {}", result.cell_count());
    println!("Total volume:  {:.12}", result.total_measure());

    println!("\nHyperplanes (anchor, normal):");
    for (i, h) in result.hyperplanes().iter().enumerate() {
        let a = h.anchor();
        let n = h.normal();
        println!(
            "  {:2}: ({:.3}, {:.3}, {:.3})  ({:+.3}, {:+.3}, {:+.3})",
            i, a[0], a[1], a[2], n[0], n[1], n[2]
        );
    }

    let triangles: usize = result.cells().iter().map(|c| c.triangles().count()).sum();
    println!("\nRender mesh: {} triangles", triangles);

    let largest = result
        .cells()
        .iter()
        .map(|c| c.measure())
        .fold(0.0_f64, f64::max);
    println!("Mean cell volume:    {:.6}", result.total_measure() / result.cell_count() as f64);
    println!("Largest cell volume: {:.6}", largest);
}
