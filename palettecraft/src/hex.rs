//! `#rrggbb` hex codes

use crate::{Error, Result};
use palette::Srgb;

/// Format a color as a lowercase `#rrggbb` hex code
#[must_use]
pub fn format(color: Srgb<u8>) -> String {
	format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Parse a six digit hex code, with or without a leading `#`
///
/// # Errors
/// Returns [`Error::InvalidParameter`] if the input is not exactly six hex digits.
pub fn parse(value: &str) -> Result<Srgb<u8>> {
	let digits = value.strip_prefix('#').unwrap_or(value);
	if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(Error::invalid_parameter("hex color", format!("{value:?} is not of the form #rrggbb")));
	}

	let channel = |i: usize| {
		digits
			.get(i..(i + 2))
			.and_then(|pair| u8::from_str_radix(pair, 16).ok())
			.ok_or_else(|| Error::invalid_parameter("hex color", format!("{value:?} is not of the form #rrggbb")))
	};

	Ok(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}
