//! Filename normalisation.
//!
//! Every output file this crate writes gets its name from [`normalize`]: a
//! pure, total function that maps arbitrary text (a filename stem or a
//! user-supplied prefix) to a string that is safe as a path component on all
//! major platforms: ASCII alphanumerics, `-`, and `_` only.
//!
//! The function is idempotent: `normalize(normalize(x)) == normalize(x)`.
//!
//! ## Pipeline
//!
//! ```text
//! lowercase ─▶ diacritic table ─▶ NFKD + strip marks ─▶ charset sweep
//!           ─▶ collapse "--" runs ─▶ trim edge dashes
//! ```
//!
//! The explicit table handles the common German/French/Spanish/Portuguese
//! letters (including `ß → ss`, which no decomposition produces); the NFKD
//! pass catches everything else that carries combining marks.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fixed substitution table for common Latin accented variants.
///
/// Ordered data, not logic. Entries apply after lowercasing, so only
/// lowercase keys are needed.
static DIACRITIC_MAP: &[(char, &str)] = &[
    ('ä', "a"),
    ('ö', "o"),
    ('ü', "u"),
    ('ß', "ss"),
    ('é', "e"),
    ('è', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('á', "a"),
    ('à', "a"),
    ('â', "a"),
    ('ã', "a"),
    ('ñ', "n"),
    ('í', "i"),
    ('ì', "i"),
    ('î', "i"),
    ('ó', "o"),
    ('ò', "o"),
    ('ô', "o"),
    ('õ', "o"),
    ('ú', "u"),
    ('ù', "u"),
    ('û', "u"),
];

/// Normalise arbitrary text into a filesystem-safe name.
///
/// The result matches `[a-z0-9_-]*`, never starts or ends with `-`, and
/// never contains `--`. The empty string is a valid result (e.g. for input
/// consisting only of punctuation).
///
/// # Example
/// ```
/// use assetprep::normalize;
///
/// assert_eq!(normalize("Müller Café"), "muller-cafe");
/// assert_eq!(normalize("Bericht März"), "bericht-marz");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    // Step 2: explicit diacritic substitutions.
    let mut substituted = String::with_capacity(lowered.len());
    'chars: for c in lowered.chars() {
        for &(from, to) in DIACRITIC_MAP {
            if c == from {
                substituted.push_str(to);
                continue 'chars;
            }
        }
        substituted.push(c);
    }

    // Step 3: decompose and drop combining marks (é → e, ž → z, …).
    let stripped: String = substituted
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    // Step 4: anything outside [a-z0-9_-] becomes a dash.
    let mut swept: String = stripped
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    // Step 5: collapse dash runs until no "--" remains.
    while swept.contains("--") {
        swept = swept.replace("--", "-");
    }

    // Step 6: trim edge dashes.
    swept.trim_matches('-').to_string()
}

/// Build an output base name from a stem or prefix plus a variant suffix.
///
/// The suffix (`"_thumb"` or `""`) is appended verbatim after normalisation;
/// the caller adds the extension.
pub fn output_basename(name: &str, suffix: &str) -> String {
    format!("{}{}", normalize(name), suffix)
}
