//! Demonstration dataset.
//!
//! Handed explicitly to [`crate::catalog::Catalog`] as its fallback when the
//! record store is unreachable, and used to populate the in-memory store in
//! development and tests.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::category::Category;
use crate::tutorial::{Tutorial, PLACEHOLDER_IMAGE};
use crate::types::{DbId, Timestamp};

fn created_on(year: i32, month: u32, day: u32) -> Timestamp {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    Utc.from_utc_datetime(&date)
}

#[allow(clippy::too_many_arguments)]
fn tutorial(
    id: DbId,
    slug: &str,
    title: &str,
    description: &str,
    category: Category,
    tags: &[&str],
    materials: &[&str],
    instructions: &[&str],
    created_at: Timestamp,
) -> Tutorial {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Tutorial {
        id,
        slug: slug.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        tags: owned(tags),
        materials: owned(materials),
        instructions: owned(instructions),
        image: PLACEHOLDER_IMAGE.to_string(),
        created_at,
    }
}

/// The six bundled tutorials, oldest first.
pub fn default_tutorials() -> Vec<Tutorial> {
    vec![
        tutorial(
            1,
            "cozy-granny-square-blanket",
            "Cozy Granny Square Blanket",
            "A classic granny square blanket perfect for beginners. This project uses basic \
             stitches to create a warm and colorful throw.",
            Category::Blankets,
            &["Beginner", "Home", "Colorful"],
            &[
                "Worsted weight yarn in 5 colors",
                "5.0mm crochet hook",
                "Yarn needle",
                "Scissors",
            ],
            &[
                "Chain 4 and join with a slip stitch to form a ring.",
                "Round 1: Ch 3 (counts as dc), work 2 dc in ring, ch 2, [3 dc in ring, ch 2] \
                 3 times, join with sl st to top of beginning ch-3.",
                "Round 2: Sl st to next dc and into ch-2 space, ch 3, work (2 dc, ch 2, 3 dc) \
                 in same space, ch 1, [(3 dc, ch 2, 3 dc) in next ch-2 space, ch 1] 3 times, join.",
                "Continue pattern for desired size, changing colors as preferred.",
                "Join squares using slip stitch or preferred joining method.",
                "Add border if desired.",
            ],
            created_on(2023, 4, 15),
        ),
        tutorial(
            2,
            "amigurumi-bunny",
            "Sweet Amigurumi Bunny",
            "Create an adorable stuffed bunny with this intermediate amigurumi pattern. \
             Perfect for gifts or nursery decor.",
            Category::Amigurumi,
            &["Intermediate", "Toys", "Gift"],
            &[
                "Sport weight yarn in main color and accent color",
                "3.5mm crochet hook",
                "Fiberfill stuffing",
                "Safety eyes (6mm)",
                "Yarn needle",
                "Stitch markers",
            ],
            &[
                "Head: Start with a magic ring.",
                "Round 1: 6 sc in magic ring (6)",
                "Round 2: Inc in each st around (12)",
                "Round 3: [Sc in next st, inc in next st] 6 times (18)",
                "Rounds 4-10: Increase then work even to 30 sts.",
                "Rounds 11-14: Decrease evenly, inserting safety eyes and stuffing firmly.",
                "Fasten off, leaving a tail for sewing.",
                "Continue with body, ears, arms, and legs using the same technique.",
            ],
            created_on(2023, 5, 22),
        ),
        tutorial(
            3,
            "market-mesh-bag",
            "Eco-Friendly Market Mesh Bag",
            "A stylish and sustainable mesh bag perfect for farmers markets or beach trips. \
             This bag is lightweight yet strong.",
            Category::Bags,
            &["Intermediate", "Eco-friendly", "Home"],
            &[
                "Cotton yarn (approx. 250g)",
                "4.5mm crochet hook",
                "Stitch markers",
                "Yarn needle",
            ],
            &[
                "Chain 35 and join with a slip stitch to form a ring.",
                "Rounds 1-2: Ch 1, sc in each st around, join (35 sc).",
                "Round 3: Ch 1, sc in same st, *ch 3, skip 2 sts, sc in next st; repeat around.",
                "Round 4: Ch 1, sc in first sc, *3 sc in ch-3 space, sc in next sc; repeat around.",
                "Alternate rounds 3 and 4 until the bag reaches the desired height.",
                "For handles: Ch 35, skip 17 sts, sl st into 18th st, ch 35, sl st back to beginning.",
                "Work sc around each handle chain, fasten off and weave in ends.",
            ],
            created_on(2023, 6, 10),
        ),
        tutorial(
            4,
            "waffle-stitch-dishcloth",
            "Textured Waffle Stitch Dishcloth",
            "Learn the popular waffle stitch with this practical dishcloth pattern. The \
             textured pattern is perfect for scrubbing dishes.",
            Category::Coasters,
            &["Beginner", "Home", "Quick"],
            &["100% cotton yarn", "4.5mm crochet hook", "Yarn needle"],
            &[
                "Ch 31 (or any multiple of 3 + 1).",
                "Row 1: Dc in 4th ch from hook and in each ch across. (29 dc)",
                "Row 2: Ch 1, sc in same st, *skip 1 dc, 3 dc in next dc, skip 1 dc, sc in next \
                 dc; repeat across. Turn.",
                "Row 3: Ch 3, dc in each dc and sc across. Turn.",
                "Repeat Rows 2-3 until the dishcloth is square.",
                "Fasten off and weave in ends.",
            ],
            created_on(2023, 7, 5),
        ),
        tutorial(
            5,
            "cable-knit-beanie",
            "Cabled Winter Beanie",
            "A cozy cabled beanie perfect for cold weather. This pattern features beautiful \
             texture and a comfortable fit.",
            Category::Hats,
            &["Intermediate", "Apparel", "Seasonal"],
            &[
                "Worsted weight yarn (100g)",
                "5.0mm crochet hook",
                "6.0mm crochet hook",
                "Stitch markers",
                "Yarn needle",
            ],
            &[
                "Ribbing: With the 5.0mm hook, ch 11 and work back-loop sc rows to head circumference.",
                "Join the ribbing into a ring with sl st.",
                "Switch to the 6.0mm hook and work front-post cable rounds around the ribbing edge.",
                "Continue cable rounds until the hat measures 18cm from the brim.",
                "Decrease evenly over the crown, cinch the opening closed and weave in ends.",
            ],
            created_on(2023, 8, 12),
        ),
        tutorial(
            6,
            "modern-wall-hanging",
            "Modern Macramé-Inspired Wall Hanging",
            "Create a trendy wall hanging combining crochet and macramé techniques. Perfect \
             for adding texture to any room.",
            Category::Decor,
            &["Intermediate", "Home", "Colorful"],
            &[
                "Bulky weight cotton yarn in main color",
                "Bulky weight cotton yarn in 2-3 accent colors",
                "8.0mm crochet hook",
                "Wooden dowel (30-40cm length)",
                "Yarn needle",
            ],
            &[
                "For the base: With main color, ch 40.",
                "Row 1: Sc in 2nd ch from hook and in each ch across. (39 sc)",
                "Rows 2-5: Ch 1, turn, sc in each sc across.",
                "Row 6: Ch 1, turn, *sc in next 3 sts, ch 5, skip 5 sts; repeat across.",
                "Rows 7-12: Ch 1, turn, sc in each sc and ch across. Fasten off.",
                "For fringe: Cut 40 strands, fold each in half and loop through the bottom edge.",
                "Trim fringe to a diagonal or V-shape, then fold the top edge over the dowel and sew.",
            ],
            created_on(2023, 9, 3),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn seed_slugs_and_ids_are_unique() {
        let seed = default_tutorials();
        let slugs: HashSet<_> = seed.iter().map(|t| t.slug.as_str()).collect();
        let ids: HashSet<_> = seed.iter().map(|t| t.id).collect();
        assert_eq!(slugs.len(), seed.len());
        assert_eq!(ids.len(), seed.len());
    }

    #[test]
    fn seed_records_are_complete() {
        for t in default_tutorials() {
            assert!(!t.title.is_empty());
            assert!(!t.description.is_empty());
            assert!(!t.materials.is_empty());
            assert!(!t.instructions.is_empty());
        }
    }
}
