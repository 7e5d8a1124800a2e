//! Font identities and their `typeface_size_style` string form.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{FontError, FontStyle, Result};

const SEPARATOR: char = '_';

/// Numeric ids of the classic typefaces, used in persisted identifiers.
const LEGACY_TYPEFACES: [(&str, &str); 8] = [
    ("chicago", "00"),
    ("courier", "01"),
    ("geneva", "02"),
    ("new york", "03"),
    ("times", "04"),
    ("helvetica", "05"),
    ("monaco", "06"),
    ("symbol", "07"),
];

/// Typeface, size and style of a bitmap font.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub typeface: String,
    pub size: u32,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn new(typeface: impl Into<String>, size: u32, style: FontStyle) -> Self {
        Self {
            typeface: typeface.into(),
            size,
            style,
        }
    }

    /// Joins the parts to `typeface_size_style`.
    ///
    /// # Errors
    ///
    /// Fails if the typeface contains the `_` separator.
    pub fn encode(&self) -> Result<String> {
        check_part(&self.typeface)?;
        Ok(format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.typeface,
            self.size,
            self.style.to_style_string()
        ))
    }

    /// Splits `typeface_size_style`. The style part is parsed leniently.
    ///
    /// # Errors
    ///
    /// Fails if a part is missing or the size is not a positive base 10 number.
    pub fn decode(s: &str) -> Result<Self> {
        let mut parts = s.split(SEPARATOR);
        let (Some(typeface), Some(size), Some(style)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(FontError::MissingPart { spec: s.to_string() });
        };
        if parts.next().is_some() {
            log::warn!("extra parts after the style of font '{s}' are ignored");
        }
        let size = match size.parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => return Err(FontError::InvalidSize(size.to_string())),
        };
        let parsed = FontStyle::parse_lenient(style);
        for token in &parsed.ignored {
            log::warn!("{token} in font '{s}'");
        }
        Ok(Self {
            typeface: typeface.to_string(),
            size,
            style: parsed.style,
        })
    }

    /// Same font with different style bits.
    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            typeface: self.typeface.clone(),
            size: self.size,
            style,
        }
    }

    pub fn get_typeface(s: &str) -> &str {
        nth_part(s, 0)
    }

    pub fn get_size_part(s: &str) -> &str {
        nth_part(s, 1)
    }

    pub fn get_style_part(s: &str) -> &str {
        nth_part(s, 2)
    }

    pub fn set_typeface(s: &str, typeface: &str) -> Result<String> {
        replace_part(s, 0, typeface)
    }

    pub fn set_size_part(s: &str, size: &str) -> Result<String> {
        replace_part(s, 1, size)
    }

    pub fn set_style_part(s: &str, style: &str) -> Result<String> {
        replace_part(s, 2, style)
    }
}

impl Display for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.typeface,
            self.size,
            self.style.to_style_string()
        )
    }
}

impl Serialize for FontSpec {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = self.encode().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for FontSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FontSpec::decode(&s).map_err(serde::de::Error::custom)
    }
}

fn check_part(part: &str) -> Result<()> {
    if part.contains(SEPARATOR) {
        return Err(FontError::PartContainsSeparator { part: part.to_string() });
    }
    Ok(())
}

fn nth_part(s: &str, n: usize) -> &str {
    s.split(SEPARATOR).nth(n).unwrap_or_default()
}

fn replace_part(s: &str, n: usize, next: &str) -> Result<String> {
    check_part(next)?;
    let mut parts: Vec<&str> = s.split(SEPARATOR).take(3).collect();
    parts.resize(3, "");
    parts[n] = next;
    Ok(parts.join("_"))
}

/// Maps a typeface name to its two digit id, `"00"` for unknown names.
/// Case insensitive, `%20` counts as a space.
pub fn legacy_typeface_id(name: &str) -> &'static str {
    let name = name.to_lowercase().replace("%20", " ");
    LEGACY_TYPEFACES
        .iter()
        .find(|(face, _)| *face == name)
        .map_or("00", |(_, id)| *id)
}

/// Reverse lookup of [`legacy_typeface_id`].
pub fn typeface_for_legacy_id(id: &str) -> Option<&'static str> {
    LEGACY_TYPEFACES.iter().find(|(_, i)| *i == id).map(|(face, _)| *face)
}

/// Rewrites `geneva_12_biuosdce` to `02_12_biuosdce`.
pub fn legacy_spec_string(s: &str) -> Result<String> {
    FontSpec::set_typeface(s, legacy_typeface_id(FontSpec::get_typeface(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let spec = FontSpec::new("geneva", 12, FontStyle::ITALIC | FontStyle::DISABLED);
        assert_eq!(spec.encode().unwrap(), "geneva_12_b+iuos+dce");
        assert_eq!(spec.to_string(), "geneva_12_b+iuos+dce");
    }

    #[test]
    fn test_decode_ignores_extra_parts() {
        let spec = FontSpec::decode("geneva_12_+biuosdce_bold").unwrap();
        assert_eq!(spec, FontSpec::new("geneva", 12, FontStyle::BOLD));
    }

    #[test]
    fn test_encode_rejects_separator() {
        let spec = FontSpec::new("new_york", 12, FontStyle::default());
        assert!(matches!(spec.encode(), Err(FontError::PartContainsSeparator { .. })));
    }

    #[test]
    fn test_decode() {
        let spec = FontSpec::decode("chicago_12_+biuosdce").unwrap();
        assert_eq!(spec, FontSpec::new("chicago", 12, FontStyle::BOLD));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(FontSpec::decode("chicago_12"), Err(FontError::MissingPart { .. })));
        assert!(matches!(FontSpec::decode("chicago_x_biuosdce"), Err(FontError::InvalidSize(_))));
        assert!(matches!(FontSpec::decode("chicago_0_biuosdce"), Err(FontError::InvalidSize(_))));
    }

    #[test]
    fn test_parts() {
        let s = "times_18_+b+iuosdce";
        assert_eq!(FontSpec::get_typeface(s), "times");
        assert_eq!(FontSpec::get_size_part(s), "18");
        assert_eq!(FontSpec::get_style_part(s), "+b+iuosdce");
        assert_eq!(FontSpec::set_typeface(s, "monaco").unwrap(), "monaco_18_+b+iuosdce");
        assert_eq!(FontSpec::set_size_part(s, "9").unwrap(), "times_9_+b+iuosdce");
        assert_eq!(FontSpec::set_style_part(s, "biuosdce").unwrap(), "times_18_biuosdce");
        assert!(FontSpec::set_style_part(s, "a_b").is_err());
    }

    #[test]
    fn test_legacy_ids() {
        assert_eq!(legacy_typeface_id("Geneva"), "02");
        assert_eq!(legacy_typeface_id("NEW%20YORK"), "03");
        assert_eq!(legacy_typeface_id("symbol"), "07");
        assert_eq!(legacy_typeface_id("comic sans"), "00");
        assert_eq!(typeface_for_legacy_id("05"), Some("helvetica"));
        assert_eq!(typeface_for_legacy_id("42"), None);
        assert_eq!(legacy_spec_string("geneva_12_biuosdce").unwrap(), "02_12_biuosdce");
    }
}
