use crate::geometry::{ConvexRegion, Hyperplane};

use super::lineage::SplitLineage;

/// Outcome of one sampling run.
///
/// `cells` tile the domain; `hyperplanes` are listed in the order they were
/// drawn. Recursive processes also report the split genealogy.
#[derive(Debug, Clone)]
pub struct TessellationResult<const D: usize, C> {
    cells: Vec<C>,
    hyperplanes: Vec<Hyperplane<D>>,
    lineage: Option<SplitLineage>,
}

impl<const D: usize, C> Default for TessellationResult<D, C> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            hyperplanes: Vec::new(),
            lineage: None,
        }
    }
}

impl<const D: usize, C: ConvexRegion<D>> TessellationResult<D, C> {
    pub(crate) fn new(
        cells: Vec<C>,
        hyperplanes: Vec<Hyperplane<D>>,
        lineage: Option<SplitLineage>,
    ) -> Self {
        Self {
            cells,
            hyperplanes,
            lineage,
        }
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn hyperplanes(&self) -> &[Hyperplane<D>] {
        &self.hyperplanes
    }

    /// Split genealogy; `None` for the Poisson process.
    pub fn lineage(&self) -> Option<&SplitLineage> {
        self.lineage.as_ref()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn hyperplane_count(&self) -> usize {
        self.hyperplanes.len()
    }

    /// Sum of cell measures; equals the domain measure up to rounding.
    pub fn total_measure(&self) -> f64 {
        self.cells.iter().map(|c| c.measure()).sum()
    }

    /// Index of the cell containing `point`, if any.
    pub fn locate(&self, point: &[f64; D], tolerance: f64) -> Option<usize> {
        self.cells.iter().position(|c| c.contains(point, tolerance))
    }

    pub fn into_parts(self) -> (Vec<C>, Vec<Hyperplane<D>>) {
        (self.cells, self.hyperplanes)
    }
}

#[cfg(feature = "serde")]
impl<const D: usize, C: serde::Serialize> serde::Serialize for TessellationResult<D, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("TessellationResult", 2)?;
        s.serialize_field("cells", &self.cells)?;
        s.serialize_field("hyperplanes", &self.hyperplanes)?;
        s.end()
    }
}
