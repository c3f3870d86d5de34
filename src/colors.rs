//! Turns escape results into pixels.  Escapers cycle through the hue
//! wheel every 256 iterations at full saturation and half lightness;
//! points that never escaped are black.  No palette, no smoothing.

use crate::escape::EscapeResult;

/// An 8-bit RGB pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Color(pub u8, pub u8, pub u8);

/// Points considered part of the set.
pub const BLACK: Color = Color(0, 0, 0);

/// How many iterations one trip around the hue wheel takes.
pub const HUE_PERIOD: usize = 256;

/// Convert a hue in degrees `[0, 360)` plus saturation and lightness
/// in `[0, 1]` to RGB.  Works in `f32` and truncates each channel, so
/// a channel only reaches 255 when it is exactly 1.0.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue / 360.0;
    let (mut r, mut g, mut b) = (lightness, lightness, lightness);
    if saturation.abs() > 0.001 {
        let high = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            (lightness + saturation) - (saturation * lightness)
        };
        let low = 2.0 * lightness - high;
        r = hue_to_channel(low, high, h + 1.0 / 3.0);
        g = hue_to_channel(low, high, h);
        b = hue_to_channel(low, high, h - 1.0 / 3.0);
    }
    Color((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

// One channel of the HSL conversion; `h` is a fraction of a turn.
fn hue_to_channel(low: f32, high: f32, mut h: f32) -> f32 {
    if h < 0.0 {
        h += 1.0;
    }
    if h > 1.0 {
        h -= 1.0;
    }
    if 6.0 * h < 1.0 {
        low + (high - low) * 6.0 * h
    } else if 2.0 * h < 1.0 {
        high
    } else if 3.0 * h < 2.0 {
        low + (high - low) * ((2.0 / 3.0) - h) * 6.0
    } else {
        low
    }
}

/// The hue, in degrees, for a point that escaped after `iterations`.
pub fn hue_for(iterations: usize) -> f32 {
    ((iterations % HUE_PERIOD) as f32) / (HUE_PERIOD as f32) * 360.0
}

/// Map one escape result to its pixel.
#[inline]
pub fn color_for(result: &EscapeResult) -> Color {
    if !result.escaped {
        return BLACK;
    }
    hsl_to_rgb(hue_for(result.iterations), 1.0, 0.5)
}
