//! Global ranking of complete segmentations.

use crate::segmentation::Segmentation;

/// Sort segmentations by total strokes, then total keys.
///
/// The sort is stable: segmentations with equal cost keep the order the
/// solver enumerated them in (longest first prefix first).
pub fn rank(mut segmentations: Vec<Segmentation>) -> Vec<Segmentation> {
    segmentations.sort_by_key(Segmentation::cost);
    segmentations
}

/// True when `segmentations` is in ranked order.
pub fn is_ranked(segmentations: &[Segmentation]) -> bool {
    segmentations.windows(2).all(|w| w[0].cost() <= w[1].cost())
}
