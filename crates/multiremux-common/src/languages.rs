//! ISO 639-2 language code table.
//!
//! Blu-ray streams tag their languages with three-letter bibliographic codes
//! (`fre`, `ger`, `chi`, ...). The table below maps those codes to the display
//! names shown to users and back again. It is a plain `static`, so lookups are
//! safe from any thread without initialization or locking.

use serde::Serialize;

/// Code used for streams whose language is not known.
pub const UNDETERMINED: &str = "und";

/// A single code/name pair in the language table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LanguageEntry {
    /// Three-letter ISO 639-2 code.
    pub code: &'static str,
    /// Human-readable English name.
    pub name: &'static str,
}

const fn entry(code: &'static str, name: &'static str) -> LanguageEntry {
    LanguageEntry { code, name }
}

static LANGUAGES: &[LanguageEntry] = &[
    entry("eng", "English"),
    entry("spa", "Spanish"),
    entry("fre", "French"),
    entry("ger", "German"),
    entry("ita", "Italian"),
    entry("por", "Portuguese"),
    entry("rus", "Russian"),
    entry("jpn", "Japanese"),
    entry("kor", "Korean"),
    entry("chi", "Chinese"),
    entry("hin", "Hindi"),
    entry("ara", "Arabic"),
    entry("dut", "Dutch"),
    entry("swe", "Swedish"),
    entry("nor", "Norwegian"),
    entry("dan", "Danish"),
    entry("fin", "Finnish"),
    entry("pol", "Polish"),
    entry("cze", "Czech"),
    entry("hun", "Hungarian"),
    entry("tha", "Thai"),
    entry("vie", "Vietnamese"),
    entry(UNDETERMINED, "Unknown"),
];

/// All known language entries, in table order.
#[must_use]
pub fn all() -> &'static [LanguageEntry] {
    LANGUAGES
}

/// Look up the display name for a three-letter code.
///
/// Matching is case-insensitive. Returns `None` for codes outside the table.
///
/// # Examples
///
/// ```
/// use multiremux_common::languages::name_for_code;
///
/// assert_eq!(name_for_code("jpn"), Some("Japanese"));
/// assert_eq!(name_for_code("ENG"), Some("English"));
/// assert_eq!(name_for_code("xyz"), None);
/// ```
#[must_use]
pub fn name_for_code(code: &str) -> Option<&'static str> {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|e| e.code.eq_ignore_ascii_case(code))
        .map(|e| e.name)
}

/// Display name for a code, falling back to the code itself when unmapped.
#[must_use]
pub fn display_name(code: &str) -> String {
    name_for_code(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

/// Reverse lookup: three-letter code for a display name.
///
/// Unknown names map to [`UNDETERMINED`].
///
/// # Examples
///
/// ```
/// use multiremux_common::languages::code_for_name;
///
/// assert_eq!(code_for_name("German"), "ger");
/// assert_eq!(code_for_name("Klingon"), "und");
/// ```
#[must_use]
pub fn code_for_name(name: &str) -> &'static str {
    let name = name.trim();
    LANGUAGES
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name))
        .map(|e| e.code)
        .unwrap_or(UNDETERMINED)
}
