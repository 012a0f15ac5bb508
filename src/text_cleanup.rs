//! Text fix-ups applied to stop names, headsigns and route names.
//!
//! Each function does one substitution. Agency profiles chain them in a fixed
//! order; later steps assume the casing step already ran.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref WORD_REGEX: Regex = Regex::new(r"\b\p{L}+\b").unwrap();
    static ref AND_REGEX: Regex = Regex::new(r"\b(?i:and)\b").unwrap();
    static ref AT_REGEX: Regex = Regex::new(r"\b(?i:at)\b").unwrap();
    static ref SLASH_REGEX: Regex = Regex::new(r"(\S)\s*/\s*(\S)").unwrap();
    static ref BOUND_REGEX: Regex =
        Regex::new(r"(?i)\b(north|south|east|west)\s*bound\b").unwrap();
    static ref ORDINAL_REGEX: Regex = Regex::new(
        r"(?i)\b(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\b"
    )
    .unwrap();
    static ref VIA_WORD_REGEX: Regex = Regex::new(r"(?i)\bvia\b").unwrap();
    // separators in front are dropped by clean_label later on
    static ref LEADING_TO_REGEX: Regex = Regex::new(r"(?i)^(?:[\s\-,/]*to\s+)+").unwrap();
    static ref TO_WORD_REGEX: Regex = Regex::new(r"(?i)\bto\b").unwrap();
    static ref KEEP_TO_REGEX: Regex = Regex::new(r"(?i)^.*\bto\s+(.+)$").unwrap();
    static ref REMOVE_VIA_REGEX: Regex = Regex::new(r"(?i)^(.*?\S)\s+via\s.*$").unwrap();
    static ref STARTS_WITH_VIA_REGEX: Regex = Regex::new(r"(?i)^via\s.*$").unwrap();
    static ref SPACES_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref OPEN_PAREN_REGEX: Regex = Regex::new(r"\(\s+").unwrap();
    static ref CLOSE_PAREN_REGEX: Regex = Regex::new(r"\s+\)").unwrap();
    static ref STREET_TYPES: Vec<(Regex, &'static str)> = [
        ("avenue", "Ave"),
        ("street", "St"),
        ("road", "Rd"),
        ("boulevard", "Blvd"),
        ("drive", "Dr"),
        ("court", "Ct"),
        ("crescent", "Cres"),
        ("highway", "Hwy"),
        ("lane", "Ln"),
        ("place", "Pl"),
        ("terrace", "Terr"),
        ("parkway", "Pkwy"),
        ("centre|center", "Ctr"),
        ("heights", "Hts"),
        ("square", "Sq"),
        ("mount", "Mt"),
    ]
    .iter()
    .map(|(long, short)| (Regex::new(&format!(r"(?i)\b({})\b", long)).unwrap(), *short))
    .collect();
}

/// Bound abbreviations produced by [`clean_bounds`]; casing leaves them alone.
const BOUND_ABBREVIATIONS: [&str; 4] = ["NB", "SB", "EB", "WB"];

/// Re-cases words written entirely in capitals (`MAIN` -> `Main`).
///
/// Words in `ignored_words` are matched without regard to case and always
/// written in their listed form. Mixed-case words are left untouched.
pub fn to_lower_case_upper_case_words(input: &str, ignored_words: &[&str]) -> String {
    WORD_REGEX
        .replace_all(input, |caps: &Captures| {
            let word = &caps[0];

            if let Some(ignored) = ignored_words
                .iter()
                .find(|ignored| ignored.eq_ignore_ascii_case(word))
            {
                return ignored.to_string();
            }

            if BOUND_ABBREVIATIONS.contains(&word) {
                return word.to_string();
            }

            if word.chars().count() > 1 && word.chars().all(char::is_uppercase) {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            } else {
                word.to_string()
            }
        })
        .into_owned()
}

pub fn clean_and(input: &str) -> String {
    AND_REGEX.replace_all(input, "&").into_owned()
}

pub fn clean_at(input: &str) -> String {
    AT_REGEX.replace_all(input, "/").into_owned()
}

/// `King/Queen` -> `King / Queen`
pub fn clean_slashes(input: &str) -> String {
    SLASH_REGEX.replace_all(input, "${1} / ${2}").into_owned()
}

/// `Northbound` -> `NB`
pub fn clean_bounds(input: &str) -> String {
    BOUND_REGEX
        .replace_all(input, |caps: &Captures| {
            let direction = caps[1].to_ascii_uppercase();
            format!("{}B", &direction[0..1])
        })
        .into_owned()
}

/// Ordinal words to numbers, `Second Ave` -> `2nd Ave`.
pub fn clean_numbers(input: &str) -> String {
    ORDINAL_REGEX
        .replace_all(input, |caps: &Captures| {
            match caps[1].to_ascii_lowercase().as_str() {
                "first" => "1st",
                "second" => "2nd",
                "third" => "3rd",
                "fourth" => "4th",
                "fifth" => "5th",
                "sixth" => "6th",
                "seventh" => "7th",
                "eighth" => "8th",
                "ninth" => "9th",
                _ => "10th",
            }
            .to_string()
        })
        .into_owned()
}

pub fn clean_street_types(input: &str) -> String {
    STREET_TYPES
        .iter()
        .fold(input.to_string(), |acc, (regex, short)| {
            regex.replace_all(&acc, *short).into_owned()
        })
}

/// Keeps the via clause of a headsign, written with a lowercase `via`.
/// A leading `to` is dropped, any other `to` is lowercased.
pub fn keep_via(input: &str) -> String {
    let input = LEADING_TO_REGEX.replace(input, "");
    let input = TO_WORD_REGEX.replace_all(&input, "to");
    VIA_WORD_REGEX.replace_all(&input, "via").into_owned()
}

/// `Kings Place to UNB via Regent` -> `UNB`
pub fn keep_to_and_remove_via(input: &str) -> String {
    let input = KEEP_TO_REGEX.replace(input, "${1}");
    REMOVE_VIA_REGEX.replace(&input, "${1}").into_owned()
}

/// Empties a label that is nothing but a `via ...` phrase.
pub fn remove_via_only(input: &str) -> String {
    STARTS_WITH_VIA_REGEX.replace(input, "").into_owned()
}

/// Final tidy: whitespace, parentheses, stray separators, leading capital.
pub fn clean_label(input: &str) -> String {
    let label = SPACES_REGEX.replace_all(input, " ");
    let label = OPEN_PAREN_REGEX.replace_all(&label, "(");
    let label = CLOSE_PAREN_REGEX.replace_all(&label, ")");

    let label = label.trim_matches(|c: char| c == '-' || c == ',' || c == '/' || c.is_whitespace());

    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();

    // `mAIN` must not turn into the all-caps `MAIN`
    let word_end = rest.find(|c: char| !c.is_alphabetic()).unwrap_or(rest.len());
    let (word_rest, tail) = rest.split_at(word_end);

    if first.is_lowercase() && !word_rest.is_empty() && word_rest.chars().all(char::is_uppercase) {
        first
            .to_uppercase()
            .chain(word_rest.chars().flat_map(char::to_lowercase))
            .chain(tail.chars())
            .collect()
    } else {
        first.to_uppercase().chain(rest.chars()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_case_words_are_recased() {
        assert_eq!(
            to_lower_case_upper_case_words("KINGS PLACE TERMINAL", &[]),
            "Kings Place Terminal"
        );
        assert_eq!(
            to_lower_case_upper_case_words("O'DELL PARK", &[]),
            "O'Dell Park"
        );
        assert_eq!(
            to_lower_case_upper_case_words("Brookside Mall", &[]),
            "Brookside Mall"
        );
    }

    #[test]
    fn ignored_words_keep_their_casing() {
        let ignored = ["DEC", "UNB"];
        assert_eq!(
            to_lower_case_upper_case_words("UNB HEAD HALL", &ignored),
            "UNB Head Hall"
        );
        assert_eq!(
            to_lower_case_upper_case_words("Unb at Dec", &ignored),
            "UNB at DEC"
        );
    }

    #[test]
    fn bound_abbreviations_survive_casing() {
        assert_eq!(to_lower_case_upper_case_words("Regent St EB", &[]), "Regent St EB");
    }

    #[test]
    fn and_at_and_slashes() {
        assert_eq!(clean_and("Smith and Jones"), "Smith & Jones");
        assert_eq!(clean_and("Sandy Anderson"), "Sandy Anderson");
        assert_eq!(clean_at("Regent at Prospect"), "Regent / Prospect");
        assert_eq!(clean_at("Atlantic Gate"), "Atlantic Gate");
        assert_eq!(clean_and("Smith And And Jones"), "Smith & & Jones");
        assert_eq!(clean_at("At at UNB"), "/ / UNB");
        assert_eq!(clean_slashes("Regent/Prospect"), "Regent / Prospect");
        assert_eq!(clean_slashes("Regent  /Prospect"), "Regent / Prospect");
    }

    #[test]
    fn bounds_numbers_and_street_types() {
        assert_eq!(clean_bounds("Prospect Westbound"), "Prospect WB");
        assert_eq!(clean_bounds("North Bound"), "NB");
        assert_eq!(clean_numbers("Second Avenue"), "2nd Avenue");
        assert_eq!(
            clean_street_types("Regent Street and Smythe Road"),
            "Regent St and Smythe Rd"
        );
        assert_eq!(clean_street_types("Fredericton Centre"), "Fredericton Ctr");
        assert_eq!(clean_street_types("Streetview"), "Streetview");
    }

    #[test]
    fn via_rules() {
        assert_eq!(keep_via("Downtown Via Main St"), "Downtown via Main St");
        assert_eq!(keep_via("To Downtown"), "Downtown");
        assert_eq!(keep_via("- To Downtown"), "Downtown");
        assert_eq!(keep_via("to to Downtown"), "Downtown");
        assert_eq!(keep_via("Kings Pl To UNB"), "Kings Pl to UNB");
        assert_eq!(keep_via("Toronto"), "Toronto");
        assert_eq!(keep_to_and_remove_via("Kings Place to UNB via Regent"), "UNB");
        assert_eq!(keep_to_and_remove_via("Downtown via Main St"), "Downtown");
        assert_eq!(keep_to_and_remove_via("via Downtown"), "via Downtown");
        assert_eq!(remove_via_only("via Downtown"), "");
        assert_eq!(remove_via_only("Downtown via Main St"), "Downtown via Main St");
    }

    #[test]
    fn label_tidy() {
        assert_eq!(clean_label("  regent   st ( north )  - "), "Regent st (north)");
        assert_eq!(clean_label("/ UNB"), "UNB");
        assert_eq!(clean_label(""), "");
        assert_eq!(clean_label("mAIN St"), "Main St");
        assert_eq!(clean_label("- uNB"), "Unb");
        assert_eq!(clean_label("iPhone Stop"), "IPhone Stop");
        assert_eq!(clean_label("a"), "A");
    }
}
