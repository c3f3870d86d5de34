//! Contains the Viewport, which describes which part of the complex
//! plane is in view, and the PlaneMapper, which describes a
//! relationship between a rectangle on the integral plane with an
//! origin at 0,0 and the region of the complex plane the viewport
//! covers.
use num::Complex;

/// The width, in complex units, of the region visible at a zoom of 1.
/// The height is the same; the view is always square in the complex
/// plane, so non-square images stretch.
pub const BASE_EXTENT: f64 = 4.0;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel in an image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The zoom and the point of the complex plane that sits at the
/// center of the image.  Zoom is the inverse of scale: doubling the
/// zoom halves the width and height of the visible region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Magnification; always greater than zero.
    pub zoom: f64,
    /// The point that maps to the center of the image.
    pub center: Complex<f64>,
}

impl Viewport {
    /// Constructor.
    pub fn new(zoom: f64, center: Complex<f64>) -> Viewport {
        Viewport { zoom, center }
    }

    /// The next viewport in a zoom: same center, zoom multiplied by
    /// `growth`.
    pub fn zoomed(&self, growth: f64) -> Viewport {
        Viewport {
            zoom: self.zoom * growth,
            center: self.center,
        }
    }

    /// The width (and height) of the visible region of the complex plane.
    pub fn extent(&self) -> f64 {
        BASE_EXTENT / self.zoom
    }
}

/// Contains the definitions of two planes: an integral cartesian plane,
/// and the complex region in view.  Maps points from one to the other.
/// Built fresh for each frame, so the scale always belongs to the
/// current zoom.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The right-lower hand corner of the integral cartesian plane.
    /// The left-upper is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The region of the complex plane in view
    pub viewport: Viewport,
    // Complex units per pixel, horizontally and vertically.
    scale: (f64, f64),
    // Half the image dimensions, in pixels.
    half: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the image and the viewport.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> PlaneMapper {
        let extent = viewport.extent();
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
            scale: (extent / (width as f64), extent / (height as f64)),
            half: ((width as f64) / 2.0, (height as f64) / 2.0),
        }
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Complex units covered by one pixel, horizontally and vertically.
    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// point on the complex plane it samples.  The pixel at
    /// (width/2, height/2) maps to the viewport's center.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            ((pixel.0 as f64) - self.half.0) * self.scale.0 + self.viewport.center.re,
            ((pixel.1 as f64) - self.half.1) * self.scale.1 + self.viewport.center.im,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seahorse() -> Complex<f64> {
        Complex::new(-0.7448617666197486, -0.1225611668766516)
    }

    #[test]
    fn center_pixel_maps_to_center_at_every_zoom() {
        for zoom in &[1.0, 1.05, 3.7, 1.0e6, 1.0e12] {
            for &(w, h) in &[(4, 4), (1080, 1080), (640, 480)] {
                let pm = PlaneMapper::new(w, h, Viewport::new(*zoom, seahorse()));
                assert_eq!(pm.pixel_to_point(&Pixel(w / 2, h / 2)), seahorse());
            }
        }
    }

    #[test]
    fn origin_pixel_is_half_an_extent_from_center() {
        let pm = PlaneMapper::new(4, 4, Viewport::new(1.0, Complex::new(0.0, 0.0)));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn doubling_zoom_halves_the_visible_region() {
        let near = PlaneMapper::new(640, 480, Viewport::new(2.0, seahorse()));
        let far = PlaneMapper::new(640, 480, Viewport::new(1.0, seahorse()));
        assert_eq!(near.scale().0 * 2.0, far.scale().0);
        assert_eq!(near.scale().1 * 2.0, far.scale().1);
        assert_eq!(near.viewport.extent(), 2.0);
    }

    #[test]
    fn scale_depends_on_resolution() {
        let pm = PlaneMapper::new(400, 200, Viewport::new(1.0, seahorse()));
        assert_eq!(pm.scale(), (0.01, 0.02));
        assert_eq!(pm.len(), 80_000);
        assert!(!pm.is_empty());
        assert!(PlaneMapper::new(0, 200, Viewport::new(1.0, seahorse())).is_empty());
    }

    #[test]
    fn zoomed_keeps_the_center() {
        let v = Viewport::new(1.0, seahorse()).zoomed(1.05);
        assert_eq!(v.zoom, 1.05);
        assert_eq!(v.center, seahorse());
    }
}
