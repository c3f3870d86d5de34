// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Row-parallel rendering.  The buffer is cut into one contiguous band
//! of whole rows per worker, each band is handed to its own scoped
//! thread, and the threads are joined before the buffer is released.
//! Workers never touch each other's rows, so the only thing they share
//! is the completed-row counter.

use crate::colors::{color_for, Color};
use crate::errors::ZoomError;
use crate::escape::escape_time;
use crate::planes::{Pixel, PlaneMapper};
use itertools::iproduct;
use std::sync::Mutex;

/// Receives a completion percentage in `[0, 100]` each time a row
/// finishes.  Called concurrently from every worker; implementations
/// must not block for long and must not fail.
pub trait Progress: Sync {
    /// Report that `percent` of the rows are done.
    fn update(&self, percent: f64);
}

/// A progress sink that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&self, _percent: f64) {}
}

/// Counts finished rows under a lock and forwards the percentage to a
/// progress sink.  The count is held only long enough to increment it.
pub struct RowCounter<'a> {
    completed: Mutex<usize>,
    total: usize,
    sink: &'a dyn Progress,
}

impl<'a> RowCounter<'a> {
    /// A counter for an image `total` rows tall.
    pub fn new(total: usize, sink: &'a dyn Progress) -> Self {
        RowCounter {
            completed: Mutex::new(0),
            total,
            sink,
        }
    }

    /// Record one finished row.  A poisoned lock skips the report
    /// rather than failing the render.
    pub fn row_done(&self) {
        let percent = match self.completed.lock() {
            Ok(mut completed) => {
                *completed += 1;
                (*completed as f64) * 100.0 / (self.total as f64)
            }
            Err(_) => return,
        };
        self.sink.update(percent);
    }

    /// Rows finished so far.
    pub fn completed(&self) -> usize {
        match self.completed.lock() {
            Ok(completed) => *completed,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Rows per band when `height` rows are shared among `threads`
/// workers.  The last band takes whatever is left over.
pub fn band_height(height: usize, threads: usize) -> usize {
    let threads = threads.max(1).min(height.max(1));
    ((height + threads - 1) / threads).max(1)
}

/// Fill every pixel of `pixels` (row-major, `plane.len()` long) using
/// up to `threads` workers and an iteration budget of `limit`.
pub fn fill_rows(
    plane: &PlaneMapper,
    limit: usize,
    pixels: &mut [Color],
    threads: usize,
    progress: &dyn Progress,
) -> Result<(), ZoomError> {
    let width = plane.integral_plane.0;
    let height = plane.integral_plane.1;
    if plane.is_empty() {
        return Ok(());
    }
    debug_assert_eq!(pixels.len(), plane.len());

    let rows = band_height(height, threads);
    let counter = RowCounter::new(height, progress);
    debug!(
        "rendering {}x{} in bands of {} rows, limit {}",
        width, height, rows, limit
    );

    crossbeam::scope(|spawner| {
        for (band, region) in pixels.chunks_mut(rows * width).enumerate() {
            let counter = &counter;
            spawner.spawn(move |_| fill_band(plane, limit, band * rows, region, counter));
        }
    })
    .map_err(|_| ZoomError::WorkerPanicked)
}

/// Render the rows of one band.  `region` starts at row `first_row`.
fn fill_band(
    plane: &PlaneMapper,
    limit: usize,
    first_row: usize,
    region: &mut [Color],
    counter: &RowCounter,
) {
    let width = plane.integral_plane.0;
    let rows = first_row..first_row + region.len() / width;
    for ((y, x), pixel) in iproduct!(rows, 0..width).zip(region.iter_mut()) {
        let point = plane.pixel_to_point(&Pixel(x, y));
        *pixel = color_for(&escape_time(point, limit));
        if x + 1 == width {
            counter.row_done();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::Viewport;
    use num::Complex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recorder {
        calls: AtomicUsize,
        highest: Mutex<f64>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                calls: AtomicUsize::new(0),
                highest: Mutex::new(0.0),
            }
        }
    }

    impl Progress for Recorder {
        fn update(&self, percent: f64) {
            assert!(percent > 0.0 && percent <= 100.0);
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut highest = self.highest.lock().unwrap();
            if percent > *highest {
                *highest = percent;
            }
        }
    }

    fn plane(width: usize, height: usize) -> PlaneMapper {
        PlaneMapper::new(
            width,
            height,
            Viewport::new(1.0, Complex::new(-0.7448617666197486, -0.1225611668766516)),
        )
    }

    fn serial(plane: &PlaneMapper, limit: usize) -> Vec<Color> {
        iproduct!(0..plane.integral_plane.1, 0..plane.integral_plane.0)
            .map(|(y, x)| color_for(&escape_time(plane.pixel_to_point(&Pixel(x, y)), limit)))
            .collect()
    }

    #[test]
    fn bands_cover_every_row() {
        assert_eq!(band_height(1080, 8), 135);
        assert_eq!(band_height(10, 3), 4);
        assert_eq!(band_height(7, 1), 7);
        assert_eq!(band_height(2, 16), 1);
        assert_eq!(band_height(5, 0), 5);
    }

    #[test]
    fn worker_count_does_not_change_the_image() {
        let pm = plane(37, 23);
        let expected = serial(&pm, 300);
        for threads in &[1, 2, 3, 4, 7, 23, 64] {
            let mut pixels = vec![Color::default(); pm.len()];
            fill_rows(&pm, 300, &mut pixels, *threads, &NoProgress).unwrap();
            assert_eq!(pixels, expected, "{} threads", threads);
        }
    }

    #[test]
    fn progress_is_reported_once_per_row() {
        let pm = plane(16, 30);
        let recorder = Recorder::new();
        let mut pixels = vec![Color::default(); pm.len()];
        fill_rows(&pm, 100, &mut pixels, 4, &recorder).unwrap();
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 30);
        assert_eq!(*recorder.highest.lock().unwrap(), 100.0);
    }

    #[test]
    fn counter_counts() {
        let counter = RowCounter::new(4, &NoProgress);
        counter.row_done();
        counter.row_done();
        assert_eq!(counter.completed(), 2);
    }
}
