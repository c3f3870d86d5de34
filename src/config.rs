//! Settings that stay fixed for the life of a run.

use crate::budget::IterationBudget;
use crate::errors::ZoomError;
use crate::planes::Viewport;
use num::Complex;

/// Real part of the default zoom target, on a seahorse-valley spiral.
pub const CENTER_RE: f64 = -0.7448617666197486;
/// Imaginary part of the default zoom target.
pub const CENTER_IM: f64 = -0.1225611668766516;
/// Zoom multiplier applied after every frame.
pub const GROWTH: f64 = 1.05;
/// Frames rendered when no count is given; effectively forever.
pub const FRAMES: u64 = 1_000_000_000;

/// Image size and the bounds of the iteration budget.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Iterations before zoom and resolution are added
    pub base_iterations: usize,
    /// Smallest budget any frame gets
    pub min_iterations: usize,
    /// Largest budget any frame gets
    pub max_iterations_cap: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1080,
            height: 1080,
            base_iterations: 1000,
            min_iterations: 500,
            max_iterations_cap: 100_000,
        }
    }
}

impl RenderConfig {
    /// Reject settings no frame could be rendered with.
    pub fn validate(&self) -> Result<(), ZoomError> {
        if self.width == 0 || self.height == 0 {
            return Err(ZoomError::config(format!(
                "image size {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if self.min_iterations > self.max_iterations_cap {
            return Err(ZoomError::config(format!(
                "minimum iterations {} exceed the cap of {}",
                self.min_iterations, self.max_iterations_cap
            )));
        }
        Ok(())
    }

    /// The iteration budget these settings describe.
    pub fn budget(&self) -> IterationBudget {
        IterationBudget::new(
            self.base_iterations,
            self.min_iterations,
            self.max_iterations_cap,
        )
    }
}

/// Where the zoom starts, how fast it goes, and how long it runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SequenceConfig {
    /// The point the zoom closes in on
    pub center: Complex<f64>,
    /// Zoom of frame 0
    pub initial_zoom: f64,
    /// Per-frame zoom multiplier; must be greater than 1
    pub growth: f64,
    /// First frame to render; earlier frames are skipped, not drawn
    pub start_frame: u64,
    /// Number of frames to render, counting from `start_frame`
    pub frames: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        SequenceConfig {
            center: Complex::new(CENTER_RE, CENTER_IM),
            initial_zoom: 1.0,
            growth: GROWTH,
            start_frame: 0,
            frames: FRAMES,
        }
    }
}

impl SequenceConfig {
    /// The viewport of frame 0.
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.initial_zoom, self.center)
    }
}
