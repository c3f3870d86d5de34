//! Where finished frames go: a directory of numbered PNGs, and a
//! one-line percentage on the terminal while each frame is drawn.

use image::png::PNGEncoder;
use image::ColorType;
use std::convert::TryFrom;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ZoomError;
use crate::renderer::PixelBuffer;
use crate::scheduler::Progress;

/// Accepts finished frames.  A failed save is reported to the caller,
/// who decides whether the run goes on.
pub trait FrameSink {
    /// Persist `buffer` as frame number `frame`, returning where it went.
    fn save(&mut self, frame: u64, buffer: &PixelBuffer) -> Result<PathBuf, ZoomError>;
}

/// Writes `frame_NNNN.png` files into one directory.
#[derive(Debug)]
pub struct PngSink {
    directory: PathBuf,
}

/// File name for frame `frame`: zero-padded to four digits, wider if
/// the index needs it.
pub fn frame_name(frame: u64) -> String {
    format!("frame_{:04}.png", frame)
}

impl PngSink {
    /// Creates `directory` and any missing parents.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self, ZoomError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| {
            ZoomError::config(format!(
                "could not create output directory {}: {}",
                directory.display(),
                e
            ))
        })?;
        Ok(PngSink { directory })
    }

    /// The directory frames are written to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn write_png(path: &Path, buffer: &PixelBuffer) -> Result<(), io::Error> {
        let width = u32::try_from(buffer.width())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "image too wide for PNG"))?;
        let height = u32::try_from(buffer.height())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "image too tall for PNG"))?;
        let mut output = BufWriter::new(File::create(path)?);
        PNGEncoder::new(&mut output).encode(&buffer.to_rgb_bytes(), width, height, ColorType::RGB(8))?;
        output.flush()
    }
}

impl FrameSink for PngSink {
    fn save(&mut self, frame: u64, buffer: &PixelBuffer) -> Result<PathBuf, ZoomError> {
        let path = self.directory.join(frame_name(frame));
        PngSink::write_png(&path, buffer).map_err(|cause| ZoomError::Save { frame, cause })?;
        Ok(path)
    }
}

/// Draws `Rendering frame NNNN: PP%` on stderr, redrawing only when the
/// whole percentage goes up.  Updates that arrive late or out of order
/// are dropped without waiting on anyone.
#[derive(Debug)]
pub struct ConsoleProgress {
    frame: u64,
    drawn: AtomicUsize,
}

impl ConsoleProgress {
    /// Progress display for frame `frame`.
    pub fn new(frame: u64) -> Self {
        ConsoleProgress {
            frame,
            drawn: AtomicUsize::new(0),
        }
    }

    /// The highest whole percentage drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn.load(Ordering::Relaxed)
    }
}

impl Progress for ConsoleProgress {
    fn update(&self, percent: f64) {
        let whole = percent.max(0.0).min(100.0).floor() as usize;
        if self.drawn.fetch_max(whole, Ordering::Relaxed) >= whole {
            return;
        }
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = write!(handle, "\rRendering frame {:04}: {:3}%", self.frame, whole);
        if whole == 100 {
            let _ = writeln!(handle);
        }
        let _ = handle.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::planes::Viewport;
    use crate::renderer::{render_frame, Renderer};
    use num::Complex;
    use std::io::Read;
    use tempfile::tempdir;

    fn small_frame() -> PixelBuffer {
        let config = RenderConfig {
            width: 6,
            height: 4,
            ..RenderConfig::default()
        };
        render_frame(&config, &Viewport::new(1.0, Complex::new(-0.5, 0.0))).unwrap()
    }

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_name(0), "frame_0000.png");
        assert_eq!(frame_name(42), "frame_0042.png");
        assert_eq!(frame_name(123_456), "frame_123456.png");
    }

    #[test]
    fn creates_the_directory_and_writes_a_png() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("frames");
        let mut sink = PngSink::new(&target).unwrap();
        assert!(target.is_dir());

        let path = sink.save(3, &small_frame()).unwrap();
        assert_eq!(path, target.join("frame_0003.png"));

        let mut header = [0u8; 8];
        File::open(&path).unwrap().read_exact(&mut header).unwrap();
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn a_failed_save_names_the_frame() {
        let dir = tempdir().unwrap();
        let mut sink = PngSink::new(dir.path()).unwrap();
        // A directory where the file should go makes File::create fail.
        fs::create_dir(dir.path().join(frame_name(9))).unwrap();
        match sink.save(9, &small_frame()) {
            Err(ZoomError::Save { frame, .. }) => assert_eq!(frame, 9),
            other => panic!("expected a save error, got {:?}", other),
        }
        // The next frame is unaffected.
        assert!(sink.save(10, &small_frame()).is_ok());
    }

    #[test]
    fn output_directory_that_is_a_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("taken");
        File::create(&file).unwrap();
        assert!(PngSink::new(&file).is_err());
    }

    #[test]
    fn console_progress_only_moves_forward() {
        let progress = ConsoleProgress::new(1);
        progress.update(12.5);
        assert_eq!(progress.drawn(), 12);
        progress.update(3.0);
        assert_eq!(progress.drawn(), 12);
        progress.update(100.0);
        assert_eq!(progress.drawn(), 100);
    }

    #[test]
    fn console_progress_reaches_100_with_many_workers() {
        let config = RenderConfig {
            width: 16,
            height: 60,
            ..RenderConfig::default()
        };
        let progress = ConsoleProgress::new(7);
        let frame = Renderer::new(config, 6)
            .unwrap()
            .render_frame_with_limit(&Viewport::new(1.0, Complex::new(-0.5, 0.0)), 200, &progress)
            .unwrap();
        assert_eq!(frame.pixels().len(), 16 * 60);
        assert_eq!(progress.drawn(), 100);
    }
}
