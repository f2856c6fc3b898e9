//! Demonstration of monotonic refinement: replaying a seed with a later stop
//! time only splits existing cells further.

use tessera::{ConvexPolygon, ConvexRegion, PlanarTessellation, ProcessKind};

fn main() {
    let seed = 11;
    let stop_times = [0.5, 1.0, 2.0, 4.0, 8.0];

    println!("=== Mondrian on the unit square, seed {} ===", seed);
    println!("{:>10} {:>8} {:>12} {:>14}", "stop_time", "cells", "hyperplanes", "mean area");

    let mut previous: Vec<ConvexPolygon> = Vec::new();
    for &stop_time in &stop_times {
        let mut engine = match PlanarTessellation::new(ProcessKind::Mondrian, None) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("Invalid configuration: {}", e);
                return;
            }
        };
        let result = match engine.sample_seeded(stop_time, seed) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Sampling failed: {}", e);
                return;
            }
        };

        println!(
            "{:>10.2} {:>8} {:>12} {:>14.6}",
            stop_time,
            result.cell_count(),
            result.hyperplane_count(),
            result.total_measure() / result.cell_count() as f64
        );

        // Every cell of this run sits inside exactly one cell of the last
        let nested = result.cells().iter().all(|cell| {
            let p = cell.interior_point();
            previous.is_empty()
                || previous
                    .iter()
                    .filter(|coarse| coarse.contains(&p, 0.0))
                    .count()
                    == 1
        });
        println!("{:>10} nested in previous: {}", "", nested);

        previous = result.cells().to_vec();
    }
}
