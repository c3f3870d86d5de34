//! How many iterations to spend on each point.  Deeper zooms need more
//! iterations to tell slow escapers from members of the set, but the
//! growth is logarithmic in the zoom and capped, so the cost of a frame
//! stays bounded.

use num::clamp;

/// The tunable parts of the iteration budget.  The bounds are
/// configuration, not constants, so they can be retuned without
/// touching the formula.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterationBudget {
    /// Iterations granted before zoom and resolution are considered.
    pub base: usize,
    /// Floor of the result.
    pub min: usize,
    /// Ceiling of the result.
    pub cap: usize,
}

impl IterationBudget {
    /// Constructor.  `min` must not exceed `cap`; see
    /// `RenderConfig::validate`.
    pub fn new(base: usize, min: usize, cap: usize) -> Self {
        IterationBudget { base, min, cap }
    }

    /// `base + floor(ln(zoom + 1) * 1000) + floor(sqrt(width * height) / 1000)`,
    /// clamped to `[min, cap]`.
    pub fn max_iterations(&self, zoom: f64, width: usize, height: usize) -> usize {
        let zoom_term = ((zoom + 1.0).ln() * 1000.0).floor().max(0.0) as usize;
        let resolution_term = (((width as f64) * (height as f64)).sqrt() / 1000.0).floor() as usize;
        let wanted = self
            .base
            .saturating_add(zoom_term)
            .saturating_add(resolution_term);
        clamp(wanted, self.min, self.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> IterationBudget {
        IterationBudget::new(1000, 500, 100_000)
    }

    #[test]
    fn first_frame_of_the_stock_zoom() {
        // ln(2) * 1000 = 693.1..., sqrt(1080 * 1080) / 1000 = 1.08
        assert_eq!(stock().max_iterations(1.0, 1080, 1080), 1694);
    }

    #[test]
    fn resolution_adds_a_little() {
        // sqrt(4000 * 4000) / 1000 = 4
        assert_eq!(stock().max_iterations(1.0, 4000, 4000), 1697);
        assert_eq!(stock().max_iterations(1.0, 4, 4), 1693);
    }

    #[test]
    fn never_decreases_as_zoom_grows() {
        let budget = stock();
        let mut zoom = 1.0;
        let mut last = budget.max_iterations(zoom, 1080, 1080);
        for _ in 0..2500 {
            zoom *= 1.05;
            let next = budget.max_iterations(zoom, 1080, 1080);
            assert!(next >= last, "{} < {} at zoom {}", next, last, zoom);
            assert!(next >= budget.min && next <= budget.cap);
            last = next;
        }
        assert_eq!(last, budget.cap);
    }

    #[test]
    fn clamped_to_the_configured_bounds() {
        let low = IterationBudget::new(0, 500, 100_000);
        assert_eq!(low.max_iterations(0.01, 4, 4), 500);

        let tight = IterationBudget::new(1000, 10, 1200);
        assert_eq!(tight.max_iterations(1.0e9, 1080, 1080), 1200);
        assert_eq!(tight.max_iterations(f64::MAX, usize::MAX, usize::MAX), 1200);
    }
}
