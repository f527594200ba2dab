//! Closed enumerations for tutorial categories and difficulty levels.
//!
//! Both parse from their display strings with an explicit `from_str`
//! returning `None` for unknown input, so a raw string never reaches the
//! domain unchecked.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The category a tutorial belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Amigurumi,
    Apparel,
    Bags,
    Blankets,
    Coasters,
    Decor,
    Hats,
    Scarves,
    Toys,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 10] = [
        Self::Amigurumi,
        Self::Apparel,
        Self::Bags,
        Self::Blankets,
        Self::Coasters,
        Self::Decor,
        Self::Hats,
        Self::Scarves,
        Self::Toys,
        Self::Other,
    ];

    /// Return the category name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amigurumi => "Amigurumi",
            Self::Apparel => "Apparel",
            Self::Bags => "Bags",
            Self::Blankets => "Blankets",
            Self::Coasters => "Coasters",
            Self::Decor => "Decor",
            Self::Hats => "Hats",
            Self::Scarves => "Scarves",
            Self::Toys => "Toys",
            Self::Other => "Other",
        }
    }

    /// Parse a category name. Matching is exact; returns `None` for unknown
    /// values.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Skill level. Stored as an ordinary tag on the tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_its_name() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn category_parse_is_case_sensitive() {
        assert_eq!(Category::from_str("hats"), None);
        assert_eq!(Category::from_str("Hats"), Some(Category::Hats));
    }

    #[test]
    fn unknown_category_is_none() {
        assert_eq!(Category::from_str("Socks"), None);
        assert_eq!(Category::from_str(""), None);
        assert_eq!(Category::from_str("all"), None);
    }

    #[test]
    fn difficulty_parse() {
        assert_eq!(Difficulty::from_str("Advanced"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::from_str("Expert"), None);
    }

    #[test]
    fn category_serializes_as_name() {
        let json = serde_json::to_string(&Category::Amigurumi).unwrap();
        assert_eq!(json, "\"Amigurumi\"");
    }
}
