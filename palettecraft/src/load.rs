//! Image loading, downscaling, and pixel sampling

use crate::{Error, Result};
use image::{imageops::FilterType, DynamicImage, RgbImage};
use palette::Srgb;
use std::path::Path;

/// Open and decode the image file at `path`, then downscale it to `max_dimension`
///
/// A `max_dimension` of `None` or `Some(0)` keeps the original size.
///
/// # Errors
/// Returns [`Error::Decode`] if the file does not exist, cannot be read,
/// or is not in a supported raster format.
pub fn open(path: impl AsRef<Path>, max_dimension: Option<u32>) -> Result<RgbImage> {
	let image = image::open(path)?;
	Ok(downscale(image, max_dimension))
}

/// Decode an in-memory image (e.g., an uploaded file), then downscale it to `max_dimension`
///
/// # Errors
/// Returns [`Error::Decode`] if the bytes are not in a supported raster format.
pub fn decode(bytes: &[u8], max_dimension: Option<u32>) -> Result<RgbImage> {
	let image = image::load_from_memory(bytes)?;
	Ok(downscale(image, max_dimension))
}

/// Returns the dimensions an image of `width` x `height` should be shrunk to
/// so that its largest side is at most `max_dimension`, or `None` if it already fits
#[must_use]
pub fn target_dimensions(width: u32, height: u32, max_dimension: Option<u32>) -> Option<(u32, u32)> {
	let limit = max_dimension.filter(|&limit| limit > 0)?;
	let largest = width.max(height);
	if largest <= limit {
		return None;
	}

	let scale = f64::from(limit) / f64::from(largest);

	// multiplying by a positive factor < 1
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let (new_width, new_height) = (
		((f64::from(width) * scale) as u32).max(1),
		((f64::from(height) * scale) as u32).max(1),
	);

	Some((new_width, new_height))
}

/// Convert to 8-bit RGB, dropping any alpha channel, and shrink the image
/// (keeping its aspect ratio) if its largest side exceeds `max_dimension`
#[must_use]
pub fn downscale(image: DynamicImage, max_dimension: Option<u32>) -> RgbImage {
	match target_dimensions(image.width(), image.height(), max_dimension) {
		Some((width, height)) => image.resize_exact(width, height, FilterType::Triangle).into_rgb8(),
		None => image.into_rgb8(),
	}
}

/// Flatten an image into its pixel colors in row-major order
///
/// # Errors
/// Returns [`Error::InvalidImage`] if the image has no pixels.
pub fn samples(image: &RgbImage) -> Result<Vec<Srgb<u8>>> {
	if image.width() == 0 || image.height() == 0 {
		return Err(Error::InvalidImage(format!(
			"the image has no pixels ({}x{})",
			image.width(),
			image.height()
		)));
	}

	Ok(palette::cast::from_component_slice::<Srgb<u8>>(image.as_raw()).to_vec())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;
	use image::{ImageFormat, Rgb, Rgba, RgbaImage};
	use std::io::Cursor;

	fn gradient(width: u32, height: u32) -> RgbImage {
		#[allow(clippy::cast_possible_truncation)]
		RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
	}

	fn png_bytes(image: &DynamicImage) -> Vec<u8> {
		let mut bytes = Vec::new();
		image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
		bytes
	}

	#[test]
	fn zero_max_dimension_keeps_size() {
		let image = DynamicImage::ImageRgb8(gradient(1000, 500));
		let resized = downscale(image.clone(), Some(0));
		assert_eq!(resized.dimensions(), (1000, 500));

		let resized = downscale(image, None);
		assert_eq!(resized.dimensions(), (1000, 500));
	}

	#[test]
	fn downscale_keeps_aspect_ratio() {
		let image = DynamicImage::ImageRgb8(gradient(1000, 500));
		assert_eq!(downscale(image, Some(200)).dimensions(), (200, 100));

		let tall = DynamicImage::ImageRgb8(gradient(30, 90));
		assert_eq!(downscale(tall, Some(45)).dimensions(), (15, 45));
	}

	#[test]
	fn small_images_are_never_upscaled() {
		let image = DynamicImage::ImageRgb8(gradient(40, 20));
		assert_eq!(downscale(image, Some(500)).dimensions(), (40, 20));
	}

	#[test]
	fn thin_images_keep_at_least_one_pixel() {
		assert_eq!(target_dimensions(1000, 1, Some(10)), Some((10, 1)));
	}

	#[test]
	fn samples_are_row_major() {
		let image = RgbImage::from_fn(2, 2, |x, y| {
			#[allow(clippy::cast_possible_truncation)]
			let v = (y * 2 + x) as u8;
			Rgb([v, v, v])
		});

		let samples = samples(&image).unwrap();
		let expected = (0..4).map(|v| Srgb::new(v, v, v)).collect::<Vec<_>>();
		assert_eq!(samples, expected);
	}

	#[test]
	fn empty_image_is_invalid() {
		let image = RgbImage::new(0, 0);
		assert!(matches!(samples(&image), Err(Error::InvalidImage(_))));
	}

	#[test]
	fn decode_drops_alpha() {
		let rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0]));
		let bytes = png_bytes(&DynamicImage::ImageRgba8(rgba));

		let image = decode(&bytes, None).unwrap();
		let samples = samples(&image).unwrap();
		assert_eq!(samples.len(), 6);
		assert!(samples.iter().all(|&c| c == Srgb::new(10, 20, 30)));
	}

	#[test]
	fn decode_rejects_garbage() {
		assert!(matches!(decode(b"definitely not an image", None), Err(Error::Decode(_))));
	}

	#[test]
	fn open_missing_file_is_decode_error() {
		let path = std::env::temp_dir().join("palettecraft-this-file-does-not-exist.png");
		assert!(matches!(open(path, None), Err(Error::Decode(_))));
	}
}
