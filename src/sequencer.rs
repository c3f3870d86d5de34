//! The zoom as a sequence of viewports.  Only the zoom changes from
//! frame to frame; the center stays put.  The caller decides when to
//! advance, so a run can be stopped and picked up again later.

use crate::config::SequenceConfig;
use crate::errors::ZoomError;
use crate::planes::Viewport;

/// Owns the current viewport and the index of the frame it belongs to.
#[derive(Clone, Debug)]
pub struct FrameSequencer {
    viewport: Viewport,
    growth: f64,
    frame: u64,
    end: Option<u64>,
}

impl FrameSequencer {
    /// A sequence starting at frame 0 with `initial` and multiplying the
    /// zoom by `growth` on every advance.
    pub fn new(initial: Viewport, growth: f64) -> Result<Self, ZoomError> {
        if !(initial.zoom > 0.0) || !initial.zoom.is_finite() {
            return Err(ZoomError::config(format!(
                "zoom must be a positive number, not {}",
                initial.zoom
            )));
        }
        if !(growth > 1.0) || !growth.is_finite() {
            return Err(ZoomError::config(format!(
                "zoom growth must be greater than 1, not {}",
                growth
            )));
        }
        Ok(FrameSequencer {
            viewport: initial,
            growth,
            frame: 0,
            end: None,
        })
    }

    /// A sequence positioned at `frame`, as if `advance` had been called
    /// `frame` times.  The zoom is replayed step by step so it matches an
    /// uninterrupted run bit for bit.  A frame whose zoom no longer
    /// fits in an `f64` is a configuration error.
    pub fn resume(initial: Viewport, growth: f64, frame: u64) -> Result<Self, ZoomError> {
        let mut sequencer = FrameSequencer::new(initial, growth)?;
        let overflow = || {
            ZoomError::config(format!(
                "frame {} is past the deepest zoom an f64 can hold",
                frame
            ))
        };
        if !(initial.zoom * growth.powf(frame as f64)).is_finite() {
            return Err(overflow());
        }
        for _ in 0..frame {
            sequencer.advance();
            if !sequencer.viewport.zoom.is_finite() {
                return Err(overflow());
            }
        }
        Ok(sequencer)
    }

    /// Build the sequence a `SequenceConfig` describes, including its
    /// frame limit.
    pub fn from_config(config: &SequenceConfig) -> Result<Self, ZoomError> {
        let sequencer =
            FrameSequencer::resume(config.initial_viewport(), config.growth, config.start_frame)?;
        Ok(sequencer.with_limit(config.frames))
    }

    /// Stop iteration after `frames` more frames.
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.end = Some(self.frame.saturating_add(frames));
        self
    }

    /// The viewport of the current frame.
    pub fn current(&self) -> Viewport {
        self.viewport
    }

    /// Index of the current frame.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Per-frame zoom multiplier.
    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// Move to the next frame.
    pub fn advance(&mut self) {
        self.viewport = self.viewport.zoomed(self.growth);
        self.frame += 1;
    }
}

/// Yields `(frame, viewport)` and advances, until the limit (if any)
/// or until the zoom overflows to infinity.
impl Iterator for FrameSequencer {
    type Item = (u64, Viewport);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(end) = self.end {
            if self.frame >= end {
                return None;
            }
        }
        if !self.viewport.zoom.is_finite() {
            warn!("zoom overflowed at frame {:04}; stopping", self.frame);
            return None;
        }
        let item = (self.frame, self.viewport);
        self.advance();
        Some(item)
    }
}
