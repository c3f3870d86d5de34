#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot zoom renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c` never carries `z`
//! off to infinity.  Points outside the set do run away, some faster
//! than others, and coloring each pixel by how many iterations its
//! point took to leave the radius-2 disc is what makes the familiar
//! pictures.
//!
//! This crate renders a sequence of such pictures, each one slightly
//! more magnified than the last, all centered on the same point.  The
//! deeper the zoom, the more iterations each point gets, because the
//! boundary gets more intricate the closer you look.  Each frame's rows
//! are split among worker threads; frames themselves are drawn one at
//! a time by whoever drives the `FrameSequencer`.
//!
//! Everything is plain `f64`, so the zoom bottoms out somewhere around
//! 10^13, where neighbouring pixels stop having distinct coordinates.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod budget;
pub mod colors;
pub mod config;
pub mod errors;
pub mod escape;
pub mod output;
pub mod planes;
pub mod renderer;
pub mod scheduler;
pub mod sequencer;

pub use budget::IterationBudget;
pub use colors::Color;
pub use config::{RenderConfig, SequenceConfig};
pub use errors::ZoomError;
pub use escape::{escape_time, EscapeResult};
pub use output::{ConsoleProgress, FrameSink, PngSink};
pub use planes::{Pixel, PlaneMapper, Viewport};
pub use renderer::{render_frame, PixelBuffer, Renderer};
pub use scheduler::{NoProgress, Progress};
pub use sequencer::FrameSequencer;
