//! tessera - stochastic hyperplane tessellations of boxes in 2D and 3D
//!
//! Three processes partition a rectangular or box-shaped domain into convex
//! cells: Poisson hyperplanes, STIT (stable under iteration) and its
//! axis-aligned Mondrian analogue. Sampling is deterministic for a given
//! seed, and the recursive processes refine monotonically as the stop time
//! grows.
//!
//! ```no_run
//! use tessera::{make_tessellation, ProcessKind};
//!
//! let mut engine = make_tessellation(ProcessKind::Stit, 2, None)?;
//! let result = engine.sample_seeded(20.0, 42)?;
//! println!("{} cells", result.cell_count());
//! # Ok::<(), tessera::TessellationError>(())
//! ```

pub mod config;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod notice;
pub mod process;
pub mod tessellation;

pub use config::TessellationConfig;
pub use direction::DirectionDistribution;
pub use error::{GeometryError, TessellationError};
pub use geometry::{BoundingBox, ConvexPolygon, ConvexPolyhedron, ConvexRegion, Hyperplane, Point};
pub use notice::Notice;
pub use process::{HyperplaneProcess, ProcessKind, SplitLineage, TessellationResult};
pub use tessellation::{
    make_tessellation, AnyResult, AnyTessellation, PlanarTessellation, SpatialTessellation,
    Tessellation,
};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn hyperplane_fields() {
        let h = Hyperplane::axis_aligned([0.25, 0.5], 1);
        let json = serde_json::to_value(h).unwrap();
        assert_eq!(json["anchor"], serde_json::json!([0.25, 0.5]));
        assert_eq!(json["normal"], serde_json::json!([0.0, 1.0]));
    }

    #[test]
    fn polygon_vertices() {
        let square = ConvexPolygon::from_bounding_box(&BoundingBox::unit());
        let json = serde_json::to_value(&square).unwrap();
        assert_eq!(json["vertices"].as_array().map(|v| v.len()), Some(4));
    }

    #[test]
    fn process_kind_is_lowercase() {
        let json = serde_json::to_string(&ProcessKind::Mondrian).unwrap();
        assert_eq!(json, "\"mondrian\"");
        let kind: ProcessKind = serde_json::from_str("\"poisson\"").unwrap();
        assert_eq!(kind, ProcessKind::Poisson);
    }

    #[test]
    fn result_lists_cells_and_hyperplanes() {
        let mut engine = SpatialTessellation::new(ProcessKind::Stit, None).unwrap();
        let result = engine.sample_seeded(4.0, 9).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(
            json["cells"].as_array().map(|c| c.len()),
            Some(result.cell_count())
        );
        assert_eq!(
            json["hyperplanes"].as_array().map(|h| h.len()),
            Some(result.hyperplane_count())
        );
        assert!(json["cells"][0]["faces"].is_array());
    }

    #[test]
    fn bounding_box_corners() {
        let b = BoundingBox::new([0.0, -1.0, 2.0], [1.0, 1.0, 3.0]).unwrap();
        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json["min"], serde_json::json!([0.0, -1.0, 2.0]));
    }
}
