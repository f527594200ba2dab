//! Filter composition for the tutorial listing.
//!
//! A [`FilterState`] narrows a collection by category, tag and free text.
//! Criteria compose by intersection and the input order is preserved. The
//! state is mirrored to a flat query string (`category`, `tag`, `search`) so
//! a listing can be shared by URL.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::tutorial::Tutorial;

/// Query-string key for the category criterion.
pub const PARAM_CATEGORY: &str = "category";
/// Query-string key for the tag criterion.
pub const PARAM_TAG: &str = "tag";
/// Query-string key for the free-text criterion.
pub const PARAM_SEARCH: &str = "search";

/// Category value meaning "no category filter".
pub const CATEGORY_ALL: &str = "all";

/// The active listing criteria. `None` means the criterion is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Option<Category>,
    pub tag: Option<String>,
    pub query: Option<String>,
}

impl FilterState {
    /// Build a state from raw, untrusted parameter values.
    ///
    /// Empty strings, the `all` sentinel and unknown categories all decode to
    /// an inactive criterion.
    pub fn from_raw(category: Option<&str>, tag: Option<&str>, query: Option<&str>) -> Self {
        let category = non_empty(category)
            .filter(|c| *c != CATEGORY_ALL)
            .and_then(Category::from_str);

        Self {
            category,
            tag: non_empty(tag).map(str::to_string),
            query: non_empty(query).map(str::to_string),
        }
    }

    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.active_tag().is_none() && self.active_query().is_none()
    }

    /// The tag criterion, if set to a non-empty value.
    pub fn active_tag(&self) -> Option<&str> {
        non_empty(self.tag.as_deref())
    }

    /// The free-text criterion, if set to a non-empty value.
    pub fn active_query(&self) -> Option<&str> {
        non_empty(self.query.as_deref())
    }

    /// Encode the active criteria as a query string (without a leading `?`).
    ///
    /// Inactive criteria are omitted entirely, never emitted as empty values.
    ///
    /// ```
    /// use opencrochet_core::category::Category;
    /// use opencrochet_core::filter::FilterState;
    ///
    /// let state = FilterState {
    ///     category: Some(Category::Hats),
    ///     tag: None,
    ///     query: Some("winter hat".into()),
    /// };
    /// assert_eq!(state.to_query_string(), "category=Hats&search=winter+hat");
    /// assert_eq!(FilterState::default().to_query_string(), "");
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(category) = self.category {
            serializer.append_pair(PARAM_CATEGORY, category.as_str());
        }
        if let Some(tag) = self.active_tag() {
            serializer.append_pair(PARAM_TAG, tag);
        }
        if let Some(query) = self.active_query() {
            serializer.append_pair(PARAM_SEARCH, query);
        }
        serializer.finish()
    }

    /// Decode a query string produced by [`Self::to_query_string`] (or typed
    /// by hand). A leading `?` is accepted; unrelated keys are ignored. When a
    /// key repeats, the first occurrence wins.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut category = None;
        let mut tag = None;
        let mut search = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                PARAM_CATEGORY => &mut category,
                PARAM_TAG => &mut tag,
                PARAM_SEARCH => &mut search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self::from_raw(category.as_deref(), tag.as_deref(), search.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Whether a single tutorial satisfies every active criterion.
pub fn matches(tutorial: &Tutorial, state: &FilterState) -> bool {
    if let Some(category) = state.category {
        if tutorial.category != category {
            return false;
        }
    }
    if let Some(tag) = state.active_tag() {
        if !tutorial.has_tag(tag) {
            return false;
        }
    }
    if let Some(query) = state.active_query() {
        if !tutorial.matches_text(&query.to_lowercase()) {
            return false;
        }
    }
    true
}

/// Return the tutorials satisfying all active criteria, in input order.
pub fn apply_filters(all: &[Tutorial], state: &FilterState) -> Vec<Tutorial> {
    all.iter().filter(|t| matches(t, state)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Query-string synchronization
// ---------------------------------------------------------------------------

/// Tracks the current external query string for a listing.
///
/// [`QuerySync::push`] returns the replacement query string only when it
/// differs from the current one. Callers replace (not append) their history
/// entry with it; an unchanged state produces no update, which breaks the
/// state -> location -> state loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySync {
    current: String,
}

impl QuerySync {
    /// Start from an existing location's query string.
    pub fn new(current: impl Into<String>) -> Self {
        let current = current.into();
        let current = current
            .strip_prefix('?')
            .map(str::to_string)
            .unwrap_or(current);
        Self { current }
    }

    /// The state encoded by the current location.
    pub fn initial_state(&self) -> FilterState {
        FilterState::from_query_string(&self.current)
    }

    /// The current query string, without a leading `?`.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Record a state change. Returns the new query string if it differs
    /// from the current one, `None` otherwise.
    pub fn push(&mut self, state: &FilterState) -> Option<&str> {
        let next = state.to_query_string();
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(&self.current)
    }
}
