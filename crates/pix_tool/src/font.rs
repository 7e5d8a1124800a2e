use std::{fs, path::Path};

use anyhow::{Context, Result};
use pix_font::{FontLibrary, FontMetrics, FontSpec, GlyphSheet};

/// Loads a font into `library` from its metrics file. The glyph sheet is
/// expected next to it as `.png`; only its name and size are recorded.
pub fn load_font(library: &FontLibrary, spec: &FontSpec, metrics_path: &Path) -> Result<()> {
    library.request(spec)?;

    let json = fs::read_to_string(metrics_path).with_context(|| format!("reading {}", metrics_path.display()))?;
    let metrics = FontMetrics::from_json(&json).with_context(|| format!("parsing {}", metrics_path.display()))?;
    let sheet = GlyphSheet::new(metrics_path.with_extension("png").to_string_lossy(), metrics.sheet_extent());

    library.metrics_loaded(spec, metrics)?;
    library.image_loaded(spec, sheet)?;
    log::info!("loaded font {spec} from {}", metrics_path.display());
    Ok(())
}

pub fn parse_spec(s: &str) -> Result<FontSpec> {
    let mut spec = FontSpec::decode(s).with_context(|| format!("invalid font '{s}'"))?;
    if let Some(typeface) = pix_font::typeface_for_legacy_id(&spec.typeface) {
        spec.typeface = typeface.to_string();
    }
    Ok(spec)
}
