//! Renders a palette as a row of labelled swatches

use crate::{Error, Palette, Result};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use palette::Srgb;
use std::io::Cursor;

/// Options for [`render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
	/// Width of each swatch in pixels
	pub swatch_width: u32,
	/// Height of each swatch (and of the whole image) in pixels
	pub swatch_height: u32,
	/// Follow each swatch with a swatch of its complementary color
	pub complements: bool,
	/// Draw the hex code of each color inside its swatch
	pub labels: bool,
}

impl PreviewOptions {
	/// Default swatch width
	pub const DEFAULT_SWATCH_WIDTH: u32 = 120;
	/// Default swatch height
	pub const DEFAULT_SWATCH_HEIGHT: u32 = 100;
}

impl Default for PreviewOptions {
	fn default() -> Self {
		Self {
			swatch_width: Self::DEFAULT_SWATCH_WIDTH,
			swatch_height: Self::DEFAULT_SWATCH_HEIGHT,
			complements: false,
			labels: true,
		}
	}
}

/// Glyph width in font pixels
const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font pixels
const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between glyphs
const GLYPH_SPACING: u32 = 1;
/// Blank border around the label text, in font pixels
const LABEL_PADDING: u32 = 2;
/// Largest font pixel size
const MAX_LABEL_SCALE: u32 = 4;

/// Label text color
const LABEL_TEXT: Rgb<u8> = Rgb([0, 0, 0]);
/// Color of the plate behind a label
const LABEL_PLATE: Rgb<u8> = Rgb([255, 255, 255]);

/// 5x7 bitmap for each character of a hex code; bit 4 is the leftmost column
fn glyph(c: char) -> Option<[u8; 7]> {
	Some(match c {
		'#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
		'0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
		'1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
		'2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
		'3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
		'4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
		'5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
		'6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
		'7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
		'8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
		'9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
		'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
		'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
		'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
		'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
		'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
		'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
		_ => return None,
	})
}

/// The swatch colors of `palette` in drawing order
#[must_use]
pub fn swatch_colors(palette: &Palette, complements: bool) -> Vec<Srgb<u8>> {
	palette
		.entries()
		.iter()
		.flat_map(|entry| {
			let complement = if complements { entry.complement } else { None };
			std::iter::once(entry.color).chain(complement)
		})
		.collect()
}

/// Render `palette` as a single row of equal-width swatches.
///
/// Each entry is followed by its complement if `options.complements` is set.
/// The output only depends on the palette and options.
///
/// # Errors
/// Returns [`Error::InvalidParameter`] if a swatch dimension is zero,
/// the image would be too wide, or complements are requested but missing from the palette.
pub fn render(palette: &Palette, options: &PreviewOptions) -> Result<RgbImage> {
	let PreviewOptions { swatch_width, swatch_height, complements, labels } = *options;

	if swatch_width == 0 || swatch_height == 0 {
		return Err(Error::invalid_parameter(
			"swatch size",
			format!("{swatch_width}x{swatch_height} must be at least 1x1"),
		));
	}

	if complements && !palette.has_complements() {
		return Err(Error::invalid_parameter(
			"complements",
			"were requested for the preview but the palette was built without them",
		));
	}

	let colors = swatch_colors(palette, complements);
	let width = u32::try_from(colors.len())
		.ok()
		.and_then(|n| n.checked_mul(swatch_width))
		.filter(|&width| i32::try_from(width).is_ok())
		.ok_or_else(|| Error::invalid_parameter("swatch width", format!("{swatch_width} makes the preview too wide")))?;

	let mut image = RgbImage::new(width, swatch_height);

	for (x, color) in (0..).step_by(swatch_width as usize).zip(colors) {
		let rgb = Rgb([color.red, color.green, color.blue]);
		draw_filled_rect_mut(&mut image, rect(x, 0, swatch_width, swatch_height), rgb);

		if labels {
			draw_label(&mut image, &crate::hex::format(color), x, swatch_width, swatch_height);
		}
	}

	Ok(image)
}

/// Encode an image as PNG
///
/// # Errors
/// Returns [`Error::Encode`] if encoding fails.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
	let mut bytes = Vec::new();
	image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).map_err(Error::Encode)?;
	Ok(bytes)
}

/// Create a rectangle; callers keep coordinates within the image, which fits in `i32`
#[allow(clippy::cast_possible_wrap)]
fn rect(x: u32, y: u32, width: u32, height: u32) -> Rect {
	Rect::at(x as i32, y as i32).of_size(width, height)
}

/// The largest font pixel size for which a label of `len` characters fits in a swatch
fn label_scale(len: u32, swatch_width: u32, swatch_height: u32) -> u32 {
	let text_width = len * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING;
	let by_width = swatch_width / (text_width + 2 * LABEL_PADDING);
	let by_height = swatch_height / (GLYPH_HEIGHT + 2 * LABEL_PADDING);
	by_width.min(by_height).min(MAX_LABEL_SCALE)
}

/// Draw `text` centered in the swatch starting at column `x`, skipping it if it does not fit
fn draw_label(image: &mut RgbImage, text: &str, x: u32, swatch_width: u32, swatch_height: u32) {
	// hex codes are 7 characters
	#[allow(clippy::cast_possible_truncation)]
	let len = text.chars().count() as u32;
	let scale = label_scale(len, swatch_width, swatch_height);
	if scale == 0 {
		return;
	}

	let text_width = (len * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale;
	let text_height = GLYPH_HEIGHT * scale;
	let padding = LABEL_PADDING * scale;
	let left = x + (swatch_width - text_width) / 2;
	let top = (swatch_height - text_height) / 2;

	draw_filled_rect_mut(
		image,
		rect(left - padding, top - padding, text_width + 2 * padding, text_height + 2 * padding),
		LABEL_PLATE,
	);

	for (i, bits) in (0..).zip(text.chars().filter_map(glyph)) {
		let glyph_left = left + i * (GLYPH_WIDTH + GLYPH_SPACING) * scale;
		for (row, &mask) in (0..).zip(&bits) {
			for col in 0..GLYPH_WIDTH {
				if mask & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
					draw_filled_rect_mut(
						image,
						rect(glyph_left + col * scale, top + row * scale, scale, scale),
						LABEL_TEXT,
					);
				}
			}
		}
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;
	use crate::assemble::assemble;

	fn test_palette(complements: bool) -> Palette {
		assemble(&[[255.0, 0.0, 0.0], [20.0, 40.0, 60.0], [250.0, 250.0, 250.0]], complements).unwrap()
	}

	fn options(complements: bool, labels: bool) -> PreviewOptions {
		PreviewOptions { swatch_width: 50, swatch_height: 30, complements, labels }
	}

	#[test]
	fn dimensions() {
		let image = render(&test_palette(false), &options(false, true)).unwrap();
		assert_eq!(image.dimensions(), (150, 30));

		let image = render(&test_palette(true), &options(true, true)).unwrap();
		assert_eq!(image.dimensions(), (300, 30));
	}

	#[test]
	fn swatches_in_palette_order() {
		let palette = test_palette(true);
		let image = render(&palette, &options(true, false)).unwrap();

		let colors = swatch_colors(&palette, true);
		assert_eq!(colors.len(), 6);
		for (i, color) in (0..).zip(&colors) {
			for (x, y) in [(0, 0), (49, 29), (25, 15)] {
				assert_eq!(*image.get_pixel(i * 50 + x, y), Rgb([color.red, color.green, color.blue]));
			}
		}

		let entries = palette.entries();
		assert_eq!(colors[0], entries[0].color);
		assert_eq!(Some(colors[1]), entries[0].complement);
		assert_eq!(colors[2], entries[1].color);
	}

	#[test]
	fn labels_are_drawn_inside_swatches() {
		let palette = test_palette(false);
		let plain = render(&palette, &options(false, false)).unwrap();
		let labelled = render(&palette, &options(false, true)).unwrap();

		assert_ne!(plain, labelled);
		// corners stay untouched
		assert_eq!(plain.get_pixel(0, 0), labelled.get_pixel(0, 0));
		assert_eq!(plain.get_pixel(149, 29), labelled.get_pixel(149, 29));
		assert!(labelled.pixels().any(|&p| p == LABEL_TEXT));
	}

	#[test]
	fn labels_skipped_when_swatch_too_small() {
		let palette = test_palette(false);
		let tiny = PreviewOptions { swatch_width: 20, swatch_height: 5, complements: false, labels: true };
		let image = render(&palette, &tiny).unwrap();
		let plain = render(&palette, &PreviewOptions { labels: false, ..tiny }).unwrap();
		assert_eq!(image, plain);
	}

	#[test]
	fn label_scale_fits() {
		assert_eq!(label_scale(7, 45, 11), 1);
		assert_eq!(label_scale(7, 44, 11), 0);
		assert_eq!(label_scale(7, 120, 100), 2);
		assert_eq!(label_scale(7, 10_000, 10_000), MAX_LABEL_SCALE);
	}

	#[test]
	fn every_hex_character_has_a_glyph() {
		for c in "#0123456789abcdef".chars() {
			assert!(glyph(c).is_some(), "{c}");
		}
	}

	#[test]
	fn render_is_deterministic() {
		let palette = test_palette(true);
		let a = encode_png(&render(&palette, &options(true, true)).unwrap()).unwrap();
		let b = encode_png(&render(&palette, &options(true, true)).unwrap()).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn zero_swatch_is_invalid() {
		let palette = test_palette(false);
		let zero = PreviewOptions { swatch_width: 0, ..options(false, true) };
		assert!(matches!(render(&palette, &zero), Err(Error::InvalidParameter { .. })));
	}

	#[test]
	fn complements_must_be_assembled() {
		let palette = test_palette(false);
		assert!(matches!(render(&palette, &options(true, true)), Err(Error::InvalidParameter { .. })));
	}

	#[test]
	fn png_round_trips() {
		let image = render(&test_palette(false), &options(false, true)).unwrap();
		let decoded = image::load_from_memory(&encode_png(&image).unwrap()).unwrap().into_rgb8();
		assert_eq!(decoded, image);
	}
}
