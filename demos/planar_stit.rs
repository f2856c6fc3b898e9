//! Demonstration of a planar STIT tessellation with a weighted direction set.

use tessera::process::TerminalReason;
use tessera::{ConvexRegion, PlanarTessellation, ProcessKind};

fn main() {
    // Mostly vertical cuts, some horizontal, a few diagonal
    let matrix = vec![vec![3.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]];

    let mut engine = match PlanarTessellation::new(ProcessKind::Stit, Some(&matrix)) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    for notice in engine.notices() {
        println!("Notice: {}", notice);
    }
    println!("Direction probabilities: {:?}", engine.directions().probabilities());

    let result = match engine.sample_seeded(25.0, 2024) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Sampling failed: {}", e);
            return;
        }
    };

    println!("\n=== STIT on the unit square (stop_time = 25) ===");
    println!("Cells:       {}", result.cell_count());
    println!("Hyperplanes: {}", result.hyperplane_count());
    println!("Total area:  {:.12}", result.total_measure());

    if let Some(lineage) = result.lineage() {
        println!("\nLineage:");
        println!("  nodes:            {}", lineage.len());
        println!("  splits:           {}", lineage.split_count());
        println!("  expired:          {}", lineage.terminal_count(TerminalReason::Expired));
        println!("  degenerate cuts:  {}", lineage.terminal_count(TerminalReason::DegenerateSplit));
        println!("  time consistent:  {}", lineage.is_time_consistent());
    }

    println!("\nLargest cells:");
    let mut cells: Vec<_> = result.cells().iter().collect();
    cells.sort_by(|a, b| b.measure().total_cmp(&a.measure()));
    for cell in cells.iter().take(5) {
        println!(
            "  area {:.4}  vertices {}  box {}",
            cell.measure(),
            cell.vertices().len(),
            cell.bounding_box()
        );
    }
}
