//! Cache Key Module
//!
//! Derives region-local cache keys from the arguments of a cacheable call.
//!
//! Search terms are case and whitespace normalized so that equivalent queries
//! share an entry. Identifiers, pages and plot variants are already canonical
//! and are used in their natural string form.

use std::fmt;

/// Separator between a search term and its page number.
pub const PAGE_SEPARATOR: &str = "_page_";

/// Separator for identifier-based keys.
pub const SEPARATOR: &str = "_";

// == Cache Key ==
/// A derived, normalized cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as stored in a region.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn normalize(term: Option<&str>) -> String {
    term.unwrap_or_default().trim().to_lowercase()
}

fn join_raw(args: &[Option<&str>]) -> String {
    args.iter()
        .map(|arg| arg.unwrap_or_default())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

// == Generic Derivation ==
/// Derives a key from an ordered argument list.
///
/// - one argument: the trimmed, lowercased term
/// - two arguments: the normalized first argument, `_page_`, then the second
///   argument as given
/// - three or more: every argument as given, joined with `_`
///
/// Absent arguments stand in as the empty string, so derivation is total.
pub fn derive_key(args: &[Option<&str>]) -> CacheKey {
    let key = match *args {
        [] => String::new(),
        [term] => normalize(term),
        [term, page] => format!(
            "{}{}{}",
            normalize(term),
            PAGE_SEPARATOR,
            page.unwrap_or_default()
        ),
        _ => join_raw(args),
    };
    CacheKey(key)
}

// == Typed Builders ==
/// Key for a lookup by title.
pub fn title_key(title: Option<&str>) -> CacheKey {
    derive_key(&[title])
}

/// Key for one page of a title search.
pub fn search_key(title: Option<&str>, page: u32) -> CacheKey {
    derive_key(&[title, Some(&page.to_string())])
}

/// Key for a lookup by identifier with a plot variant (`short` or `full`).
pub fn details_key(id: Option<&str>, plot: &str) -> CacheKey {
    CacheKey(format!("{}{}{}", normalize(id), SEPARATOR, plot))
}

/// Key for a season listing. Both parts are used verbatim.
pub fn season_key(series_id: &str, season: &str) -> CacheKey {
    CacheKey(join_raw(&[Some(series_id), Some(season)]))
}

/// Key for a single episode. All parts are used verbatim.
pub fn episode_key(series_id: &str, season: &str, episode: &str) -> CacheKey {
    derive_key(&[Some(series_id), Some(season), Some(episode)])
}
