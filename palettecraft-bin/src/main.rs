//! Extract the dominant colors of an image with k-means clustering.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
	clippy::pedantic,
	clippy::cargo,
	clippy::use_debug,
	clippy::dbg_macro,
	clippy::todo,
	clippy::unimplemented,
	clippy::unwrap_used,
	clippy::unwrap_in_result,
	clippy::unneeded_field_pattern,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::unnecessary_self_imports,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::string_slice,
	missing_docs,
	clippy::missing_docs_in_private_items,
	rustdoc::all,
	clippy::float_cmp_const,
	clippy::lossy_float_literal
)]
#![allow(clippy::doc_markdown, clippy::module_name_repetitions, clippy::unreadable_literal)]

mod cli;

#[allow(clippy::wildcard_imports)]
use cli::*;

use std::{
	fmt::{self, Display},
	path::{Path, PathBuf},
	process::ExitCode,
	time::Instant,
};

use clap::Parser;
use colored::Colorize;
use palettecraft::{load, preview, ColorCounts, ExtractOptions, Palette};

/// Record the running time of a function and print the elapsed time
macro_rules! time {
	($name: literal, $verbose: expr, $func_call: expr) => {{
		let start = Instant::now();
		let result = $func_call;
		if $verbose {
			println!("{} took {}ms", $name, start.elapsed().as_millis());
		}
		result
	}};
}

/// Error cases for generating and writing a palette
#[derive(Debug)]
enum CliError {
	/// Loading, clustering, or rendering failed
	Palette(palettecraft::Error),
	/// Failed to write an output file
	Io {
		/// The output file
		path: PathBuf,
		/// The underlying error
		source: std::io::Error,
	},
	/// Failed to serialize the palette
	Json(serde_json::Error),
	/// Failed to build the thread pool
	#[cfg(feature = "threads")]
	ThreadPool(rayon::ThreadPoolBuildError),
}

impl Display for CliError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			CliError::Palette(e) => write!(f, "{e}"),
			CliError::Io { path, source } => write!(f, "Failed to write {}: {source}", path.display()),
			CliError::Json(e) => write!(f, "Failed to serialize the palette: {e}"),
			#[cfg(feature = "threads")]
			CliError::ThreadPool(e) => write!(f, "Failed to start the thread pool: {e}"),
		}
	}
}

impl From<palettecraft::Error> for CliError {
	fn from(e: palettecraft::Error) -> Self {
		CliError::Palette(e)
	}
}

fn main() -> ExitCode {
	let options = Options::parse();

	let result = run_generate_palette(&options);

	// Returning Result<_> uses Debug printing instead of Display
	if let Err(e) = result {
		eprintln!("{e}");
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

/// Builds a thread pool and then runs `generate_palette`
#[cfg(feature = "threads")]
fn run_generate_palette(options: &Options) -> Result<(), CliError> {
	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(usize::from(options.threads))
		.build()
		.map_err(CliError::ThreadPool)?;

	pool.install(|| generate_palette(options))
}

/// Runs `generate_palette` on a single thread
#[cfg(not(feature = "threads"))]
fn run_generate_palette(options: &Options) -> Result<(), CliError> {
	generate_palette(options)
}

/// The extraction settings for the given options
fn extract_options(options: &Options) -> Result<ExtractOptions, CliError> {
	let extract = ExtractOptions {
		colors: options.colors,
		max_dimension: palettecraft::max_dimension_from_arg(options.resize)?,
		complements: options.complement,
		trials: options.trials,
		convergence_threshold: options.convergence_threshold,
		max_iter: options.max_iter,
		seed: options.seed,
	};
	extract.validate()?;
	Ok(extract)
}

/// Load an image, generate its palette, and print or write the result using the given options
fn generate_palette(options: &Options) -> Result<(), CliError> {
	let extract = extract_options(options)?;
	let verbose = options.verbose;

	// Input
	let image = time!("Image loading", verbose, load::open(&options.image, extract.max_dimension))?;
	if verbose {
		println!("Sampling an image with dimensions {}x{}", image.width(), image.height());
	}

	// Processing
	let palette = {
		let start = Instant::now();

		let samples = load::samples(&image)?;
		let counts = time!("Preprocessing", verbose, ColorCounts::from_samples(&samples));
		if verbose {
			println!("Reduced image to {} unique colors", counts.num_colors());
		}

		let (palette, result) = time!("k-means", verbose, palettecraft::palette_from_counts(&counts, &extract))?;
		if verbose {
			println!("k-means took {} iterations with a variance of {}", result.iterations, result.variance);
			println!("Palette generation took {}ms in total", start.elapsed().as_millis());
		}

		palette
	};

	// Output
	if let Some(path) = &options.out_json {
		let json = palette.to_json().map_err(CliError::Json)?;
		write_file(path, json)?;
		println!("{}", saved_message("palette JSON", path));
	} else {
		for line in summary(&palette, options.colorize) {
			println!("{line}");
		}
	}

	if let Some(path) = &options.out_image {
		let image = time!("Preview rendering", verbose, preview::render(&palette, &options.preview()))?;
		let png = preview::encode_png(&image)?;
		write_file(path, png)?;
		println!("{}", saved_message("palette image", path));
	}

	Ok(())
}

/// Write `contents` to the file at `path`
fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), CliError> {
	std::fs::write(path, contents).map_err(|source| CliError::Io { path: path.to_owned(), source })
}

/// Confirmation printed after writing an output file
fn saved_message(what: &str, path: &Path) -> String {
	format!("Saved {what} to {}", path.display())
}

/// The lines of the printed palette summary
fn summary(palette: &Palette, colorize: Option<ColorizeOutput>) -> Vec<String> {
	let mut lines = vec!["Dominant colors:".to_owned()];
	lines.extend(numbered(palette.colors(), colorize));

	if palette.has_complements() {
		lines.push("Complementary colors:".to_owned());
		lines.extend(numbered(palette.entries().iter().filter_map(|entry| entry.complement), colorize));
	}

	lines
}

/// Format each color as `  i. #rrggbb (r, g, b)`, colorizing the text if requested
fn numbered(
	colors: impl Iterator<Item = palette::Srgb<u8>>,
	colorize: Option<ColorizeOutput>,
) -> impl Iterator<Item = String> {
	colors.enumerate().map(move |(i, color)| {
		let text = format!(
			"{} ({}, {}, {})",
			palettecraft::hex::format(color),
			color.red,
			color.green,
			color.blue
		);

		let text = match colorize {
			Some(ColorizeOutput::Fg) => text.truecolor(color.red, color.green, color.blue).to_string(),
			Some(ColorizeOutput::Bg) => text.on_truecolor(color.red, color.green, color.blue).to_string(),
			None => text,
		};

		format!("  {}. {text}", i + 1)
	})
}
