//! Turns k-means centroids into a sorted palette

use crate::{hex, hsl, kmeans::Point, Error, Result};
use palette::Srgb;
use serde::Serialize;

/// Luminance weights for the red, green, and blue channels (Rec. 709)
const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Perceptual brightness used to order the palette
#[must_use]
pub fn luminance(color: Srgb<u8>) -> f64 {
	LUMINANCE_WEIGHTS[0] * f64::from(color.red)
		+ LUMINANCE_WEIGHTS[1] * f64::from(color.green)
		+ LUMINANCE_WEIGHTS[2] * f64::from(color.blue)
}

/// Round a centroid to the nearest 8-bit color
#[must_use]
pub fn round_centroid(centroid: Point) -> Srgb<u8> {
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let channel = |v: f32| {
		if v.is_nan() {
			0
		} else {
			v.round().clamp(0.0, 255.0) as u8
		}
	};
	Srgb::new(channel(centroid[0]), channel(centroid[1]), channel(centroid[2]))
}

/// One color of a palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
	/// The dominant color
	pub color: Srgb<u8>,
	/// Luminance of `color`, see [`luminance`]
	pub luminance: f64,
	/// The complementary color, if requested
	pub complement: Option<Srgb<u8>>,
}

impl PaletteEntry {
	/// Create an entry without a complement
	#[must_use]
	pub fn new(color: Srgb<u8>) -> Self {
		Self { color, luminance: luminance(color), complement: None }
	}

	/// The color as a lowercase `#rrggbb` hex code
	#[must_use]
	pub fn hex(&self) -> String {
		hex::format(self.color)
	}

	/// The complementary color as a lowercase `#rrggbb` hex code
	#[must_use]
	pub fn complement_hex(&self) -> Option<String> {
		self.complement.map(hex::format)
	}

	/// Serializable form of this entry
	#[must_use]
	pub fn record(&self) -> PaletteRecord {
		let rgb = |c: Srgb<u8>| [c.red, c.green, c.blue];
		PaletteRecord {
			rgb: rgb(self.color),
			hex: self.hex(),
			complement_rgb: self.complement.map(rgb),
			complement_hex: self.complement_hex(),
		}
	}
}

/// JSON shape of a [`PaletteEntry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteRecord {
	/// `[r, g, b]`
	pub rgb: [u8; 3],
	/// `#rrggbb`
	pub hex: String,
	/// `[r, g, b]` of the complementary color
	#[serde(skip_serializing_if = "Option::is_none")]
	pub complement_rgb: Option<[u8; 3]>,
	/// `#rrggbb` of the complementary color
	#[serde(skip_serializing_if = "Option::is_none")]
	pub complement_hex: Option<String>,
}

/// Palette entries ordered by non-decreasing luminance
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
	/// The sorted entries
	entries: Vec<PaletteEntry>,
}

impl Palette {
	/// The entries, darkest first
	#[must_use]
	pub fn entries(&self) -> &[PaletteEntry] {
		&self.entries
	}

	/// The number of entries
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether there are no entries (never true for an assembled palette)
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Whether every entry carries a complementary color
	#[must_use]
	pub fn has_complements(&self) -> bool {
		self.entries.iter().all(|entry| entry.complement.is_some())
	}

	/// The dominant colors, darkest first
	pub fn colors(&self) -> impl Iterator<Item = Srgb<u8>> + '_ {
		self.entries.iter().map(|entry| entry.color)
	}

	/// Serializable form of each entry
	#[must_use]
	pub fn records(&self) -> Vec<PaletteRecord> {
		self.entries.iter().map(PaletteEntry::record).collect()
	}

	/// The palette as a pretty-printed JSON array
	///
	/// # Errors
	/// Only fails if `serde_json` fails to serialize plain integers and strings.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(&self.records())
	}
}

/// Build a palette from unordered centroids.
///
/// Centroids are rounded to 8-bit colors and stably sorted by ascending luminance.
/// Every centroid gives one entry, even if it rounds to the same color as another centroid.
/// If `complements` is set, each entry gets its hue-rotated complement.
///
/// # Errors
/// Returns [`Error::EmptyPalette`] if `centroids` is empty.
pub fn assemble(centroids: &[Point], complements: bool) -> Result<Palette> {
	if centroids.is_empty() {
		return Err(Error::EmptyPalette);
	}

	let mut entries = centroids
		.iter()
		.map(|&centroid| PaletteEntry::new(round_centroid(centroid)))
		.collect::<Vec<_>>();

	// sort_by is stable, so equal luminances keep the clustering order
	entries.sort_by(|x, y| f64::total_cmp(&x.luminance, &y.luminance));

	if complements {
		for entry in &mut entries {
			entry.complement = Some(hsl::complement(entry.color));
		}
	}

	Ok(Palette { entries })
}
