use crate::lexicon::{Lexicon, RegionRule};
use crate::text::replace_chars;

pub const NOT_DEFINED: &str = "NotDefined";
pub const UNKNOWN_REGION: &str = "Unknown";
pub const REMOTE: &str = "Remote";

pub fn clean_location(location: &str, lexicon: &Lexicon) -> String {
    replace_chars(location, &lexicon.special_chars, " ")
}

/// First space-separated token of the cleaned location.
pub fn city_from_location(cleaned: Option<&str>) -> String {
    cleaned
        .and_then(|l| l.split(' ').next())
        .filter(|c| !c.is_empty())
        .unwrap_or(NOT_DEFINED)
        .to_string()
}

/// First rule with a city keyword contained in `city` wins.
pub fn classify_region<'a>(city: &str, rules: &'a [RegionRule]) -> &'a str {
    rules
        .iter()
        .find(|rule| rule.cities.iter().any(|c| city.contains(c.as_str())))
        .map(|rule| rule.region.as_str())
        .unwrap_or(UNKNOWN_REGION)
}

pub fn is_remote(region: Option<&str>) -> bool {
    region.is_some_and(|r| r.contains(REMOTE))
}
