//! Race titles derived from event URL slugs.
//!
//! `/event/maine-presidential-election-winner` becomes "Maine";
//! `.../congressional-district-2nd-nebraska-presidential-election-winner`
//! becomes "Congressional District 2nd Nebraska". Malformed URLs produce a
//! garbled title rather than an error.

use regex::Regex;
use std::sync::LazyLock;

/// Slug text from this word onwards is dropped
const TITLE_MARKER: &str = "Presidential";

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([A-Za-z]+)").expect("ordinal regex is valid"));

/// Non-empty path segments of an absolute URL or a site-relative href
fn path_segments(url: &str) -> Vec<&str> {
    let path = match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.find('/').map(|p| &rest[p..]).unwrap_or("")
        }
        None => url,
    };
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Uppercase a letter that follows a non-letter, lowercase every other letter
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Lowercase ordinal suffixes that title-casing capitalized ("2Nd" -> "2nd")
pub fn fix_ordinals(text: &str) -> String {
    ORDINAL_RE
        .replace_all(text, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], caps[2].to_lowercase())
        })
        .into_owned()
}

/// Slug -> spaced, title-cased text cut before the marker word
fn slug_title(slug: &str) -> String {
    let spaced = title_case(&slug.replace('-', " "));
    let mut head = match spaced.find(TITLE_MARKER) {
        Some(idx) => spaced[..idx].to_string(),
        None => spaced,
    };
    // separator in front of the marker
    head.pop();
    head
}

/// Title for a state race linked from the elections map
pub fn state_title(url: &str) -> String {
    let segments = path_segments(url);
    let slug = segments
        .iter()
        .position(|s| *s == "event")
        .and_then(|i| segments.get(i + 1))
        .or_else(|| segments.last())
        .copied()
        .unwrap_or("");
    slug_title(slug)
}

/// Title for a congressional district race
pub fn district_title(url: &str) -> String {
    let segments = path_segments(url);
    let slug = segments.last().copied().unwrap_or("");
    fix_ordinals(&slug_title(slug))
}
