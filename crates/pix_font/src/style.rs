//! Font style flags and their persisted 8 token form.
//!
//! Every flag is written as a two character token in a fixed order: the flag
//! letter alone when unset, `+letter` when set. Bold and italic on, everything
//! else off reads `+b+iuosdce`.

use std::{convert::Infallible, fmt::Display, str::FromStr};

use bitflags::bitflags;

bitflags! {
    /// Style bits of a bitmap font. Flags combine with bitwise OR,
    /// e.g. bold and italic is `BOLD | ITALIC`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FontStyle: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const OUTLINE = 1 << 3;
        const SHADOW = 1 << 4;
        const DISABLED = 1 << 5;
        const CONDENSED = 1 << 6;
        const EXTEND = 1 << 7;
    }
}

/// Canonical token order of the style string.
const STYLE_TOKENS: [(char, FontStyle); 8] = [
    ('b', FontStyle::BOLD),
    ('i', FontStyle::ITALIC),
    ('u', FontStyle::UNDERLINE),
    ('o', FontStyle::OUTLINE),
    ('s', FontStyle::SHADOW),
    ('d', FontStyle::DISABLED),
    ('c', FontStyle::CONDENSED),
    ('e', FontStyle::EXTEND),
];

/// A `+x` pair that did not name a known style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoredToken {
    /// Char offset of the `+` in the parsed string
    pub offset: usize,
    pub letter: char,
}

impl Display for IgnoredToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized text style '+{}' at {}", self.letter, self.offset)
    }
}

/// Result of a lenient style parse: the flags that were recognized and
/// the tokens that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleParse {
    pub style: FontStyle,
    pub ignored: Vec<IgnoredToken>,
}

impl FontStyle {
    fn letter_to_flag(letter: char) -> Option<FontStyle> {
        STYLE_TOKENS.iter().find(|(l, _)| *l == letter).map(|(_, flag)| *flag)
    }

    /// Serializes the flags into the fixed 8 token form.
    pub fn to_style_string(self) -> String {
        let mut result = String::with_capacity(16);
        for (letter, flag) in STYLE_TOKENS {
            if self.contains(flag) {
                result.push('+');
            }
            result.push(letter);
        }
        result
    }

    /// Scans left to right for `+letter` pairs. Accepts any order or subset,
    /// everything that isn't a known pair is skipped.
    pub fn parse_lenient(s: &str) -> StyleParse {
        let mut result = StyleParse::default();
        let chars: Vec<char> = s.chars().collect();
        for (i, pair) in chars.windows(2).enumerate() {
            if pair[0] != '+' {
                continue;
            }
            match Self::letter_to_flag(pair[1]) {
                Some(flag) => result.style |= flag,
                None => result.ignored.push(IgnoredToken { offset: i, letter: pair[1] }),
            }
        }
        result
    }

    /// Styles that the renderer synthesizes from the plain glyph sheet
    /// instead of loading a dedicated one.
    pub fn synthesized() -> FontStyle {
        FontStyle::CONDENSED | FontStyle::EXTEND | FontStyle::UNDERLINE
    }
}

impl Display for FontStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_style_string())
    }
}

impl FromStr for FontStyle {
    type Err = Infallible;

    /// Lenient parse; unknown tokens are logged and dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = FontStyle::parse_lenient(s);
        for token in &parsed.ignored {
            log::warn!("{token} in '{s}'");
        }
        Ok(parsed.style)
    }
}
