//! Bitmap font handling: font identities, glyph metrics, measuring and hit-testing.
//!
//! Fonts are pixel glyph sheets with a metrics table; letters have varying
//! widths. Loading the sheet and the metrics happens elsewhere, this crate only
//! observes when both have arrived and then measures text with them.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FontError>;

mod geometry;
pub use geometry::*;

pub mod style;
pub use style::{FontStyle, IgnoredToken, StyleParse};

pub mod spec;
pub use spec::{legacy_spec_string, legacy_typeface_id, typeface_for_legacy_id, FontSpec};

pub mod metrics;
pub use metrics::{FontMetrics, GlyphBounds};

pub mod asset;
pub use asset::{FontAsset, GlyphSheet};

pub mod library;
pub use library::{FontLibrary, LibraryMeasure};

pub mod measure;
pub use measure::{measure_string, DrawCharResult, TextMeasure, TextRendererFont};

pub mod hit_test;
pub use hit_test::{char_at, CharRectType, FoundCharByLocation};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Invalid metrics for font {spec}")]
    InvalidMetrics { spec: String },

    #[error("Parts of a font cannot contain the \"_\" character: {part}")]
    PartContainsSeparator { part: String },

    #[error("Font spec '{spec}' must have typeface, size and style parts")]
    MissingPart { spec: String },

    #[error("Invalid font size: {0}")]
    InvalidSize(String),

    #[error("Invalid font metrics: {0}")]
    MetricsFormat(#[from] serde_json::Error),
}
