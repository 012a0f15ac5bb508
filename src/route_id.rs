use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIGITS_THEN_LETTER_REGEX: Regex = Regex::new("^([0-9]+)([A-Za-z])$").unwrap();
}

/// Ids for `<digits><letter>` short names live above this, one block per letter.
pub const LETTER_SUFFIX_ID_BLOCK: u64 = 100_000;

pub fn cleanup_route_short_name(short_name: &str, cleanup_regex: Option<&Regex>) -> String {
    let short_name = short_name.trim();

    match cleanup_regex {
        Some(regex) => regex.replace(short_name, "").to_string(),
        None => short_name.to_string(),
    }
}

/// Numeric id for a (cleaned) short name, when one follows from its shape:
/// `12` -> 12, `14N` -> 14 + 14 * 100 000.
pub fn route_id_from_short_name(short_name: &str) -> Option<u64> {
    if let Ok(id) = short_name.parse::<u64>() {
        return Some(id);
    }

    let caps = DIGITS_THEN_LETTER_REGEX.captures(short_name)?;

    // a larger prefix would run into the next letter's block
    let number = caps[1]
        .parse::<u64>()
        .ok()
        .filter(|number| *number < LETTER_SUFFIX_ID_BLOCK)?;
    let letter = caps[2].to_ascii_uppercase().chars().next()?;
    let letter_index = (letter as u64) - ('A' as u64) + 1;

    letter_index
        .checked_mul(LETTER_SUFFIX_ID_BLOCK)?
        .checked_add(number)
}
