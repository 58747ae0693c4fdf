//! Extract the dominant colors of an image with k-means clustering,
//! derive their complementary colors, and render preview swatches.
//!
//! # Examples
//!
//! ## Read an image file and get 5 dominant colors.
//!
//! ```no_run
//! let options = palettecraft::ExtractOptions::default();
//! let palette = palettecraft::from_path("some image", &options)?;
//! for entry in palette.entries() {
//! 	println!("{}", entry.hex());
//! }
//! # Ok::<(), palettecraft::Error>(())
//! ```
//!
//! ## Handle an uploaded image.
//!
//! ```no_run
//! # let bytes: Vec<u8> = Vec::new();
//! use palettecraft::{ExtractOptions, PreviewOptions};
//!
//! let extract = ExtractOptions { colors: 8, complements: true, ..ExtractOptions::default() };
//! let preview = PreviewOptions { complements: true, ..PreviewOptions::default() };
//!
//! let result = palettecraft::from_bytes(&bytes, &extract, &preview)?;
//! let png = palettecraft::preview::encode_png(&result.preview)?;
//! let json = result.palette.to_json().expect("plain data");
//! # Ok::<(), palettecraft::Error>(())
//! ```
//!
//! # Pipeline
//!
//! image → samples → k-means centroids → palette sorted by luminance → complements → preview.
//!
//! The palette is always sorted from darkest to lightest using Rec. 709 luminance.
//! The order in which k-means returns its centroids carries no meaning.
//!
//! ## Fewer distinct colors than requested
//!
//! k-means never returns empty or duplicate clusters. If an image has fewer distinct colors than
//! the requested number of colors, the palette has one entry per distinct color.
//! Otherwise it has exactly the requested number of entries: each centroid gives one entry,
//! even if two centroids happen to round to the same 8-bit color.
//!
//! ## Seed
//!
//! The random number generator that picks the initial centroids is seeded with
//! [`ExtractOptions::seed`], so the same image and options always give the same palette.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![warn(clippy::float_cmp_const, clippy::lossy_float_literal)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::enum_glob_use)]
#![allow(clippy::unreadable_literal)]

use image::RgbImage;
use std::path::Path;

pub mod assemble;
mod error;
pub mod hex;
pub mod hsl;
pub mod kmeans;
pub mod load;
pub mod preview;

pub use assemble::{Palette, PaletteEntry, PaletteRecord};
pub use error::{Error, Result};
pub use kmeans::{ColorCounts, KmeansOptions, KmeansResult};
pub use preview::PreviewOptions;

/// Options for extracting a palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
	/// The (maximum) number of dominant colors
	pub colors: u8,
	/// Shrink the image so that its largest side is at most this many pixels before sampling
	///
	/// `None` or `Some(0)` keeps the original size.
	pub max_dimension: Option<u32>,
	/// Compute the complementary color of each entry
	pub complements: bool,
	/// The number of k-means runs; the one with the lowest variance is kept
	pub trials: u32,
	/// Stop k-means once the centroids moved at most this much in total during an iteration
	pub convergence_threshold: f32,
	/// Upper bound on k-means iterations for each trial
	pub max_iter: u32,
	/// Seed for choosing the initial centroids
	pub seed: u64,
}

impl ExtractOptions {
	/// Default number of colors
	pub const DEFAULT_COLORS: u8 = 5;
	/// Default maximum image dimension
	pub const DEFAULT_MAX_DIMENSION: u32 = 500;
	/// Default number of k-means trials
	pub const DEFAULT_TRIALS: u32 = 1;
	/// Default convergence threshold (in 8-bit RGB units)
	pub const DEFAULT_CONVERGENCE_THRESHOLD: f32 = 0.05;
	/// Default maximum number of k-means iterations
	pub const DEFAULT_MAX_ITER: u32 = 128;

	/// Check that every option is in range
	///
	/// # Errors
	/// Returns [`Error::InvalidParameter`] naming the first offending option.
	pub fn validate(&self) -> Result<()> {
		if self.colors == 0 {
			return Err(Error::invalid_parameter("colors", "must be at least 1"));
		}
		if self.trials == 0 {
			return Err(Error::invalid_parameter("trials", "must be at least 1"));
		}
		if self.max_iter == 0 {
			return Err(Error::invalid_parameter("max iterations", "must be at least 1"));
		}
		if !(self.convergence_threshold.is_finite() && self.convergence_threshold >= 0.0) {
			return Err(Error::invalid_parameter(
				"convergence threshold",
				format!("{} must be a finite number >= 0", self.convergence_threshold),
			));
		}
		Ok(())
	}

	/// The k-means parameters for these options
	#[must_use]
	pub fn kmeans(&self) -> KmeansOptions {
		KmeansOptions {
			trials: self.trials,
			k: self.colors,
			convergence_threshold: self.convergence_threshold,
			max_iter: self.max_iter,
			seed: self.seed,
		}
	}
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			colors: Self::DEFAULT_COLORS,
			max_dimension: Some(Self::DEFAULT_MAX_DIMENSION),
			complements: false,
			trials: Self::DEFAULT_TRIALS,
			convergence_threshold: Self::DEFAULT_CONVERGENCE_THRESHOLD,
			max_iter: Self::DEFAULT_MAX_ITER,
			seed: 0,
		}
	}
}

/// Convert a signed resize argument into a maximum dimension
///
/// `0` disables resizing.
///
/// # Errors
/// Returns [`Error::InvalidParameter`] for negative values or values above `u32::MAX`.
pub fn max_dimension_from_arg(resize: i64) -> Result<Option<u32>> {
	match u32::try_from(resize) {
		Ok(0) => Ok(None),
		Ok(limit) => Ok(Some(limit)),
		Err(_) if resize < 0 => Err(Error::invalid_parameter("resize", format!("{resize} must not be negative"))),
		Err(_) => Err(Error::invalid_parameter("resize", format!("{resize} is too large"))),
	}
}

/// Run k-means on the samples of `image` and assemble the resulting palette.
///
/// `options.max_dimension` is not applied here, since the image is assumed to already be loaded at the
/// desired size (see [`load::downscale`]).
///
/// # Errors
/// Returns [`Error::InvalidParameter`] for out of range options,
/// [`Error::InvalidImage`] for an image with no pixels, and
/// [`Error::EmptyPalette`] if clustering gives no colors.
pub fn extract(image: &RgbImage, options: &ExtractOptions) -> Result<Palette> {
	options.validate()?;
	let samples = load::samples(image)?;
	let counts = ColorCounts::from_samples(&samples);
	palette_from_counts(&counts, options).map(|(palette, _)| palette)
}

/// Run k-means on already deduplicated colors and assemble the palette.
///
/// Also returns the raw k-means result, e.g., for diagnostics.
///
/// # Errors
/// Returns [`Error::InvalidParameter`] for out of range options and
/// [`Error::EmptyPalette`] if clustering gives no colors.
pub fn palette_from_counts(counts: &ColorCounts, options: &ExtractOptions) -> Result<(Palette, KmeansResult)> {
	options.validate()?;
	let result = kmeans::run(counts, &options.kmeans());
	let palette = assemble::assemble(&result.centroids, options.complements)?;
	Ok((palette, result))
}

/// Load the image at `path` and extract its palette.
///
/// # Errors
/// Returns [`Error::Decode`] if the file cannot be read or decoded,
/// otherwise see [`extract`].
pub fn from_path(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Palette> {
	options.validate()?;
	let image = load::open(path, options.max_dimension)?;
	extract(&image, options)
}

/// A palette together with its rendered preview
#[derive(Debug, Clone)]
pub struct Extraction {
	/// The extracted palette
	pub palette: Palette,
	/// The rendered swatches
	pub preview: RgbImage,
}

/// Decode in-memory image bytes, extract the palette, and render its preview.
///
/// This is the entry point for handling uploaded files.
///
/// # Errors
/// Returns [`Error::Decode`] for undecodable bytes, otherwise see [`extract`] and [`preview::render`].
pub fn from_bytes(bytes: &[u8], extract_options: &ExtractOptions, preview_options: &PreviewOptions) -> Result<Extraction> {
	extract_options.validate()?;
	let image = load::decode(bytes, extract_options.max_dimension)?;
	let palette = extract(&image, extract_options)?;
	let preview = preview::render(&palette, preview_options)?;
	Ok(Extraction { palette, preview })
}
