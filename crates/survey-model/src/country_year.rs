//! Parsing of the combined `"<country> [<year>]"` field.

use std::sync::LazyLock;

use regex::Regex;

/// Free text, one whitespace character, then a bracketed four-digit year.
static COUNTRY_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\s\[(\d{4})\]$").expect("Invalid country/year regex"));

/// Country and year split out of a combined field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryYear {
    pub country: String,
    pub year: String,
}

/// Splits `"Finland [1990]"` into `("Finland", "1990")`.
///
/// Returns `None` when the value does not end in a single space followed by a
/// bracketed four-digit year, or when the country part is blank. The year
/// stays a string.
pub fn parse_country_year(raw: &str) -> Option<CountryYear> {
    let captures = COUNTRY_YEAR_REGEX.captures(raw)?;
    let country = captures.get(1)?.as_str().trim();
    if country.is_empty() {
        return None;
    }
    let year = captures.get(2)?.as_str();
    Some(CountryYear {
        country: country.to_string(),
        year: year.to_string(),
    })
}
