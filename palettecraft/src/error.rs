//! Error types returned by the palette pipeline

use thiserror::Error;

/// Result type alias for palettecraft operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while turning an image into a palette
#[derive(Error, Debug)]
pub enum Error {
	/// The file could not be read, or its content is not a supported raster format
	#[error("Failed to decode the image: {0}")]
	Decode(#[from] image::ImageError),

	/// The decoded image cannot be sampled
	#[error("Invalid image: {0}")]
	InvalidImage(String),

	/// A caller supplied option is out of range
	#[error("Invalid parameter: {name} {reason}")]
	InvalidParameter {
		/// Name of the offending option
		name: &'static str,
		/// What is wrong with its value
		reason: String,
	},

	/// Clustering did not produce a single centroid
	#[error("Clustering produced an empty palette")]
	EmptyPalette,

	/// The preview image could not be encoded
	#[error("Failed to encode the preview image: {0}")]
	Encode(#[source] image::ImageError),
}

impl Error {
	/// Create an [`Error::InvalidParameter`]
	pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidParameter { name, reason: reason.into() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_parameter_message_names_the_option() {
		let err = Error::invalid_parameter("colors", "must be at least 1");
		assert_eq!(err.to_string(), "Invalid parameter: colors must be at least 1");
	}
}
