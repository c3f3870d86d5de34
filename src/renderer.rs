// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Renders one frame: picks the iteration budget for the frame's zoom,
//! allocates the pixels, fills them row-parallel, and hands back the
//! finished buffer.  Nothing here touches the disk.

use crate::colors::Color;
use crate::config::RenderConfig;
use crate::errors::ZoomError;
use crate::planes::{PlaneMapper, Viewport};
use crate::scheduler::{fill_rows, NoProgress, Progress};

/// One finished frame, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Reserve a `width` x `height` buffer, reporting failure instead of
    /// aborting.
    fn allocate(width: usize, height: usize) -> Result<Vec<Color>, ZoomError> {
        let len = width
            .checked_mul(height)
            .ok_or(ZoomError::Allocation { width, height })?;
        let mut pixels: Vec<Color> = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| ZoomError::Allocation { width, height })?;
        pixels.resize(len, Color::default());
        Ok(pixels)
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixels, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Packed 8-bit RGB, three bytes per pixel, ready for an encoder.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for c in &self.pixels {
            bytes.extend_from_slice(&[c.0, c.1, c.2]);
        }
        bytes
    }
}

/// Renders frames of a fixed size with a fixed number of workers.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: RenderConfig,
    threads: usize,
}

impl Renderer {
    /// Validates the configuration.  `threads` is the number of row
    /// workers; zero is treated as one.
    pub fn new(config: RenderConfig, threads: usize) -> Result<Self, ZoomError> {
        config.validate()?;
        Ok(Renderer {
            config,
            threads: threads.max(1),
        })
    }

    /// The settings every frame is rendered with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of row workers.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// The iteration budget for a frame at `viewport`.
    pub fn max_iterations(&self, viewport: &Viewport) -> usize {
        self.config
            .budget()
            .max_iterations(viewport.zoom, self.config.width, self.config.height)
    }

    /// Render one frame at `viewport`, reporting row completion to
    /// `progress`.
    pub fn render_frame(
        &self,
        viewport: &Viewport,
        progress: &dyn Progress,
    ) -> Result<PixelBuffer, ZoomError> {
        let limit = self.max_iterations(viewport);
        debug!("zoom {:e}: {} iterations", viewport.zoom, limit);
        self.render_frame_with_limit(viewport, limit, progress)
    }

    /// Render one frame with an explicit iteration budget, bypassing the
    /// zoom-derived one.
    pub fn render_frame_with_limit(
        &self,
        viewport: &Viewport,
        limit: usize,
        progress: &dyn Progress,
    ) -> Result<PixelBuffer, ZoomError> {
        let (width, height) = (self.config.width, self.config.height);
        let plane = PlaneMapper::new(width, height, *viewport);
        let mut pixels = PixelBuffer::allocate(width, height)?;
        fill_rows(&plane, limit, &mut pixels, self.threads, progress)?;
        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }
}

/// Render one frame with one worker per CPU and no progress reporting.
pub fn render_frame(config: &RenderConfig, viewport: &Viewport) -> Result<PixelBuffer, ZoomError> {
    Renderer::new(*config, num_cpus::get())?.render_frame(viewport, &NoProgress)
}
