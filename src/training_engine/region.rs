use crate::training_engine::models::{Comparison, RegionFilter};

/// Is `position` inside the highlighted tail? Always false without a filter.
///
/// Inclusive on both sides: the threshold itself is part of the region.
pub fn in_region(position: f64, filter: Option<&RegionFilter>) -> bool {
    match filter {
        None => false,
        Some(f) => match f.comparison {
            Comparison::AtLeast => position >= f.threshold,
            Comparison::AtMost  => position <= f.threshold,
        },
    }
}
