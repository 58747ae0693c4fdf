//! Specifies the CLI and handles arg parsing

use clap::{Parser, ValueEnum};
use palettecraft::{ExtractOptions, PreviewOptions};
use std::{
	fmt::{Debug, Display},
	num::ParseFloatError,
	ops::RangeBounds,
	path::PathBuf,
	str::FromStr,
};

/// Ways to colorize the output text
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorizeOutput {
	/// Foreground
	Fg,
	/// Background
	Bg,
}

/// Extract the dominant colors of an image with k-means clustering.
///
/// The colors are printed from darkest to lightest.
/// Palettecraft can also print the complementary color of each dominant color,
/// write the palette as JSON, and render a preview image of swatches.
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(version)]
pub struct Options {
	/// The path to the input image
	pub image: PathBuf,

	/// The (maximum) number of dominant colors to find
	///
	/// Fewer colors are returned if the image does not have this many distinct colors.
	#[arg(short = 'k', long, default_value_t = ExtractOptions::DEFAULT_COLORS, value_parser = clap::value_parser!(u8).range(1..))]
	pub colors: u8,

	/// Also compute the complementary color (hue rotated by 180°) of each dominant color
	#[arg(short, long)]
	pub complement: bool,

	/// Write a PNG preview of the palette to this path
	#[arg(short = 'o', long)]
	pub out_image: Option<PathBuf>,

	/// Write the palette as JSON to this path instead of printing a summary
	#[arg(short = 'j', long)]
	pub out_json: Option<PathBuf>,

	/// Shrink the image so that its largest side is at most this many pixels
	///
	/// Smaller images are processed faster, but multiple pixels in the original image are
	/// interpolated to form a single pixel in the smaller image.
	/// Use 0 to keep the original size.
	#[arg(short, long, default_value_t = i64::from(ExtractOptions::DEFAULT_MAX_DIMENSION), allow_negative_numbers = true)]
	pub resize: i64,

	/// The width of each swatch in the preview image
	#[arg(long, default_value_t = PreviewOptions::DEFAULT_SWATCH_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
	pub swatch_width: u32,

	/// The height of each swatch in the preview image
	#[arg(long, default_value_t = PreviewOptions::DEFAULT_SWATCH_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
	pub swatch_height: u32,

	/// Do not draw hex codes on the preview swatches
	#[arg(long)]
	pub no_labels: bool,

	/// Color the foreground or background for each printed color
	#[arg(long)]
	pub colorize: Option<ColorizeOutput>,

	/// The number of trials of k-means to run
	///
	/// k-means can get stuck in a local minimum, so you may want to run a few or more trials to get better results.
	/// The trial with the lowest variance is picked.
	#[arg(short = 'n', long, default_value_t = ExtractOptions::DEFAULT_TRIALS, value_parser = clap::value_parser!(u32).range(1..))]
	pub trials: u32,

	/// The threshold used to determine k-means convergence
	///
	/// k-means stops once the centroids moved at most this much in total (in 8-bit RGB units)
	/// during an iteration.
	#[arg(short = 'e', long, default_value_t = ExtractOptions::DEFAULT_CONVERGENCE_THRESHOLD, value_parser = parse_valid_convergence)]
	pub convergence_threshold: f32,

	/// The maximum number of iterations for each k-means trial
	///
	/// You can use the --verbose option to see how many iterations the best k-means trial took.
	#[arg(short = 'i', long, default_value_t = ExtractOptions::DEFAULT_MAX_ITER, value_parser = clap::value_parser!(u32).range(1..))]
	pub max_iter: u32,

	/// The seed value used for the random number generator
	#[arg(long, default_value_t = 0)]
	pub seed: u64,

	/// The number of threads to use
	///
	/// A value of 0 indicates to automatically choose the number of threads.
	#[cfg(feature = "threads")]
	#[arg(short, long, default_value_t = 0)]
	pub threads: u8,

	/// Print additional information, such as the number of k-means iterations
	#[arg(long)]
	pub verbose: bool,
}

impl Options {
	/// The preview settings for these options
	pub fn preview(&self) -> PreviewOptions {
		PreviewOptions {
			swatch_width: self.swatch_width,
			swatch_height: self.swatch_height,
			complements: self.complement,
			labels: !self.no_labels,
		}
	}
}

/// Parse a float value and ensure it in the provided, valid range
fn parse_float_in_range<T>(s: &str, range: impl RangeBounds<T> + Debug) -> Result<T, String>
where
	T: FromStr<Err = ParseFloatError> + Display + PartialOrd,
{
	let value: T = s.parse().map_err(|e| format!("{e}"))?;
	if range.contains(&value) {
		Ok(value)
	} else {
		Err(format!("{value} is not in {range:?}"))
	}
}

/// Parse the convergence number and ensure it is >= `0.0`
fn parse_valid_convergence(s: &str) -> Result<f32, String> {
	parse_float_in_range(s, 0.0..)
}
