//! Conversions between 8-bit sRGB and HSL, and hue rotation.
//!
//! Conversions use `f64` so that converting an 8-bit color to HSL and back
//! always reproduces the original color exactly.

use palette::{encoding, RgbHue, Srgb};

/// HSL color with hue in degrees and saturation/lightness in `0.0..=1.0`
pub type Hsl = palette::Hsl<encoding::Srgb, f64>;

/// Convert an 8-bit sRGB color to HSL.
///
/// Achromatic colors (r = g = b) have an undefined hue, which is reported as `0.0`.
#[must_use]
pub fn rgb_to_hsl(color: Srgb<u8>) -> Hsl {
	let r = f64::from(color.red) / 255.0;
	let g = f64::from(color.green) / 255.0;
	let b = f64::from(color.blue) / 255.0;

	let max = r.max(g).max(b);
	let min = r.min(g).min(b);
	let lightness = (max + min) / 2.0;
	let delta = max - min;

	if delta == 0.0 {
		return Hsl::new(0.0, 0.0, lightness);
	}

	let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());

	#[allow(clippy::float_cmp)]
	let hue = if max == r {
		60.0 * ((g - b) / delta).rem_euclid(6.0)
	} else if max == g {
		60.0 * ((b - r) / delta + 2.0)
	} else {
		60.0 * ((r - g) / delta + 4.0)
	};

	Hsl::new(normalize_degrees(hue), saturation, lightness)
}

/// Convert an HSL color to 8-bit sRGB, rounding each channel to the nearest integer.
#[must_use]
pub fn hsl_to_rgb(color: Hsl) -> Srgb<u8> {
	let hue = hue_degrees(color.hue);
	let saturation = color.saturation.clamp(0.0, 1.0);
	let lightness = color.lightness.clamp(0.0, 1.0);

	let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
	let sector = hue / 60.0;
	let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
	let m = lightness - chroma / 2.0;

	// hue is in [0, 360) so the sector is in [0, 6)
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let (r, g, b) = match sector as u32 {
		0 => (chroma, x, 0.0),
		1 => (x, chroma, 0.0),
		2 => (0.0, chroma, x),
		3 => (0.0, x, chroma),
		4 => (x, 0.0, chroma),
		_ => (chroma, 0.0, x),
	};

	Srgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

/// Rotate the hue of `color` by `degrees` while keeping its saturation and lightness
#[must_use]
pub fn rotate_hue(color: Srgb<u8>, degrees: f64) -> Srgb<u8> {
	let mut hsl = rgb_to_hsl(color);
	hsl.hue = RgbHue::from_degrees(normalize_degrees(hue_degrees(hsl.hue) + degrees));
	hsl_to_rgb(hsl)
}

/// The complementary color: the hue rotated by 180 degrees
#[must_use]
pub fn complement(color: Srgb<u8>) -> Srgb<u8> {
	rotate_hue(color, 180.0)
}

/// Hue in degrees within `[0, 360)`
fn hue_degrees(hue: RgbHue<f64>) -> f64 {
	normalize_degrees(hue.into_raw_degrees())
}

/// Wrap an angle into `[0, 360)`
fn normalize_degrees(degrees: f64) -> f64 {
	let wrapped = degrees.rem_euclid(360.0);
	// rem_euclid can round up to exactly 360.0 for tiny negative inputs
	if wrapped >= 360.0 {
		0.0
	} else {
		wrapped
	}
}

/// Scale a `0.0..=1.0` component to the nearest 8-bit value
fn to_channel(value: f64) -> u8 {
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	{
		(value * 255.0).round().clamp(0.0, 255.0) as u8
	}
}
