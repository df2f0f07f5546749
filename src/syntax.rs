//! # Syntax database
//!
//! A tiny, built-in table of syntax descriptors, selected by matching the file's extension. There
//! is no user-extensible configuration directory: that would require an on-disk format, which is
//! out of scope for this editor (see `Config`).

/// Highlighting rules and metadata for one file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxConf {
    /// Name shown in the status bar, e.g. `"c"`.
    pub name: &'static str,
    /// Extensions (without the leading dot) that select this syntax.
    pub extensions: &'static [&'static str],
    /// Whether to highlight decimal numbers.
    pub highlight_numbers: bool,
    /// Whether to highlight `"…"` / `'…'` string literals.
    pub highlight_strings: bool,
}

/// The built-in syntax database. Checked in extension order; the first match wins.
const SYNTAXES: &[SyntaxConf] = &[SyntaxConf {
    name: "c",
    extensions: &["c", "h", "cpp"],
    highlight_numbers: true,
    highlight_strings: true,
}];

impl SyntaxConf {
    /// Find the syntax descriptor whose extension list contains `extension`.
    pub fn for_extension(extension: &str) -> Option<&'static SyntaxConf> {
        SYNTAXES.iter().find(|s| s.extensions.contains(&extension))
    }
}

#[cfg(test)]
impl SyntaxConf {
    /// A syntax with both highlighters on, used by row-store unit tests.
    pub fn for_test_numbers_and_strings() -> SyntaxConf {
        SyntaxConf {
            name: "test",
            extensions: &[],
            highlight_numbers: true,
            highlight_strings: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_extensions() {
        assert!(SyntaxConf::for_extension("c").is_some());
        assert!(SyntaxConf::for_extension("h").is_some());
        assert!(SyntaxConf::for_extension("cpp").is_some());
    }

    #[test]
    fn unknown_extension_has_no_syntax() {
        assert!(SyntaxConf::for_extension("rs").is_none());
    }
}
