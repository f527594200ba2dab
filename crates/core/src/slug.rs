//! Slug derivation from tutorial titles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Slug used when a title contains no word characters at all.
pub const FALLBACK_SLUG: &str = "tutorial";

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s]").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Derive a URL-safe slug from a title.
///
/// Lowercases, strips every character that is neither an ASCII word
/// character nor whitespace, then collapses whitespace runs into single
/// hyphens. Leading and trailing hyphens are trimmed.
///
/// # Examples
///
/// ```
/// use opencrochet_core::slug::slugify;
/// assert_eq!(slugify("Cozy Granny Square Blanket!"), "cozy-granny-square-blanket");
/// assert_eq!(slugify("  Eco-Friendly   Bag "), "ecofriendly-bag");
/// assert_eq!(slugify("???"), "tutorial");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RE.replace_all(stripped.trim(), "-");

    if hyphenated.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        hyphenated.into_owned()
    }
}

/// Hands out unique slugs, suffixing `-2`, `-3`, ... on collision.
///
/// Seed it with the slugs already present in the store so a batch never
/// collides with existing records either.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    taken: HashSet<String>,
}

impl SlugAllocator {
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: taken.into_iter().map(Into::into).collect(),
        }
    }

    /// Reserve a unique slug derived from `title`.
    pub fn allocate(&mut self, title: &str) -> String {
        let base = slugify(title);
        if self.taken.insert(base.clone()) {
            return base;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
