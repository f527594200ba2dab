//! Query parameter types for API handlers.

use opencrochet_core::filter::FilterState;
use serde::Deserialize;

/// Listing filters (`?category=&tag=&search=`).
///
/// Raw values are normalized by [`FilterState::from_raw`]: blank values and
/// `category=all` mean "no criterion", unknown categories are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl ListingParams {
    pub fn to_filter(&self) -> FilterState {
        FilterState::from_raw(
            self.category.as_deref(),
            self.tag.as_deref(),
            self.search.as_deref(),
        )
    }
}
