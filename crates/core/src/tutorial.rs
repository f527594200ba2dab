//! The canonical tutorial record.

use serde::{Deserialize, Serialize};

use crate::category::{Category, Difficulty};
use crate::types::{DbId, Timestamp};

/// Image used when a tutorial has none of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A persisted crochet pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub materials: Vec<String>,
    pub instructions: Vec<String>,
    pub image: String,
    pub created_at: Timestamp,
}

impl Tutorial {
    /// Whether `tag` is one of this tutorial's tags (exact, case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match against title, description and
    /// category. `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.as_str().to_lowercase().contains(needle)
    }

    /// Tags that name a difficulty level, in tag order.
    pub fn difficulties(&self) -> Vec<Difficulty> {
        self.tags
            .iter()
            .filter_map(|t| Difficulty::from_str(t))
            .collect()
    }
}

/// A transformed import row awaiting insertion. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTutorial {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub materials: Vec<String>,
    pub instructions: Vec<String>,
    pub image: String,
    pub created_at: Timestamp,
}

impl NewTutorial {
    /// Attach a store-assigned id.
    pub fn into_tutorial(self, id: DbId) -> Tutorial {
        Tutorial {
            id,
            slug: self.slug,
            title: self.title,
            description: self.description,
            category: self.category,
            tags: self.tags,
            materials: self.materials,
            instructions: self.instructions,
            image: self.image,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tutorial {
        Tutorial {
            id: 1,
            slug: "sweet-amigurumi-bunny".to_string(),
            title: "Sweet Amigurumi Bunny".to_string(),
            description: "An adorable stuffed bunny.".to_string(),
            category: Category::Amigurumi,
            tags: vec!["Intermediate".into(), "Toys".into(), "Gift".into()],
            materials: vec!["Sport weight yarn".into()],
            instructions: vec!["Start with a magic ring.".into()],
            image: PLACEHOLDER_IMAGE.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn has_tag_is_exact() {
        let t = sample();
        assert!(t.has_tag("Toys"));
        assert!(!t.has_tag("toys"));
        assert!(!t.has_tag("Toy"));
    }

    #[test]
    fn matches_text_checks_title_description_and_category() {
        let t = sample();
        assert!(t.matches_text("bunny"));
        assert!(t.matches_text("stuffed"));
        assert!(t.matches_text("amigu"));
        assert!(!t.matches_text("blanket"));
    }

    #[test]
    fn difficulties_picks_level_tags() {
        assert_eq!(sample().difficulties(), vec![Difficulty::Intermediate]);
    }
}
