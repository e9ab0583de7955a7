//! Destination text shortening
//!
//! Direction strings come from the transit endpoint as full stop names
//! ("Karlsruhe Hauptbahnhof"). The display row has room for 17 characters,
//! so a fixed abbreviation table is applied first and the result is
//! hard-truncated with a trailing marker only if it still does not fit.

use heapless::String;

/// Maximum direction length in display characters
pub const MAX_DIRECTION_CHARS: usize = 17;

/// Byte capacity backing a shortened direction (umlauts take two bytes)
pub const MAX_DIRECTION_BYTES: usize = 34;

/// Working capacity for un-shortened direction strings
const SCRATCH_BYTES: usize = 96;

/// Abbreviation table, most specific entries first.
///
/// The Kaiserslautern entries must run before the generic station-name
/// rules so the city name survives instead of degrading stepwise.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("Kaiserslautern, Hauptbahnhof", "Kaiserslautern"),
    ("Kaiserslautern, Hbf", "Kaiserslautern"),
    ("Hauptbahnhof", "Hbf"),
    ("Bahnhof", "Bhf"),
    ("Straße", "Str."),
    ("Platz", "Pl."),
    (", ", " "),
];

type Scratch = String<SCRATCH_BYTES>;

/// Shorten a destination name to at most [`MAX_DIRECTION_CHARS`] characters.
///
/// Truncation keeps the first 16 characters and appends a `'.'` marker;
/// strings that fit after abbreviation pass through unchanged. Cuts always
/// land on UTF-8 character boundaries.
pub fn shorten_text(text: &str) -> String<MAX_DIRECTION_BYTES> {
    let mut current = clip::<SCRATCH_BYTES>(text);
    for (full, short) in REPLACEMENTS {
        if current.contains(full) {
            current = replace_all(&current, full, short);
        }
    }

    let mut out = String::new();
    if current.chars().count() <= MAX_DIRECTION_CHARS {
        let _ = out.push_str(&current);
    } else {
        for c in current.chars().take(MAX_DIRECTION_CHARS - 1) {
            let _ = out.push(c);
        }
        let _ = out.push('.');
    }
    out
}

/// Copy as many leading characters of `text` as fit into the capacity.
///
/// Never splits a UTF-8 character; overflow drops the tail.
pub fn clip<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

fn replace_all(input: &str, from: &str, to: &str) -> Scratch {
    let mut out = Scratch::new();
    let mut rest = input;
    while let Some(idx) = rest.find(from) {
        let _ = out.push_str(&rest[..idx]);
        let _ = out.push_str(to);
        rest = &rest[idx + from.len()..];
    }
    let _ = out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hauptbahnhof_abbreviated() {
        let s = shorten_text("Karlsruhe Hauptbahnhof");
        assert_eq!(s.as_str(), "Karlsruhe Hbf");
        assert!(s.chars().count() <= MAX_DIRECTION_CHARS);
    }

    #[test]
    fn test_short_name_unchanged() {
        assert_eq!(shorten_text("Menzingen").as_str(), "Menzingen");
    }

    #[test]
    fn test_kaiserslautern_collapses_once() {
        assert_eq!(
            shorten_text("Kaiserslautern, Hauptbahnhof").as_str(),
            "Kaiserslautern"
        );
        assert_eq!(
            shorten_text("Kaiserslautern, Hbf").as_str(),
            "Kaiserslautern"
        );
    }

    #[test]
    fn test_strasse_and_platz() {
        // Table entries are capitalized; compounds keep their lowercase tail
        assert_eq!(shorten_text("Platz der Einheit").as_str(), "Pl. der Einheit");
        assert_eq!(shorten_text("Straße des Rechts").as_str(), "Str. des Rechts");
        assert_eq!(shorten_text("Marktplatz").as_str(), "Marktplatz");
    }

    #[test]
    fn test_comma_space_collapsed() {
        assert_eq!(
            shorten_text("Bruchsal, Bahnhof").as_str(),
            "Bruchsal Bhf"
        );
    }

    #[test]
    fn test_truncation_marker_only_when_cut() {
        let long = shorten_text("Germersheim Wissenschaftszentrum");
        assert_eq!(long.chars().count(), MAX_DIRECTION_CHARS);
        assert!(long.ends_with('.'));

        let fits = shorten_text("Odenheim");
        assert!(!fits.ends_with('.'));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 16th char position falls inside multi-byte territory
        let s = shorten_text("Öhringen Süd über Schwäbisch Hall");
        assert!(s.chars().count() <= MAX_DIRECTION_CHARS);
        assert!(s.is_char_boundary(s.len()));
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn shortened_always_fits_display_row(s in "\\PC{0,60}") {
            let out = shorten_text(&s);
            assert!(out.chars().count() <= MAX_DIRECTION_CHARS);
            assert!(out.len() <= MAX_DIRECTION_BYTES);
            assert!(out.is_char_boundary(out.len()));
        }

        #[test]
        fn plain_short_names_pass_through(s in "[a-z ]{0,17}") {
            // no table entry matches lowercase-only text, and 17 chars
            // of ASCII always fit, so the input survives untouched
            let out = shorten_text(&s);
            assert_eq!(out.as_str(), s.as_str());
        }
    }
}
