//! The client-defined cuisine catalog.
//!
//! Filter panels are built from this fixed list, grouped into display
//! categories. Backend rows reference tags by name; a tag with no backend
//! data simply never matches anything.

use crate::domain::CuisineTag;

/// One display group of cuisine tags.
#[derive(Debug, Clone, Copy)]
pub struct CuisineCategory {
    pub name: &'static str,
    pub tags: &'static [&'static str],
}

/// Display categories in panel order.
pub const CATEGORIES: &[CuisineCategory] = &[
    CuisineCategory {
        name: "Asian",
        tags: &[
            "Japanese",
            "Chinese",
            "Korean",
            "Thai",
            "Vietnamese",
            "Indian",
            "Sushi",
            "Ramen",
            "Dim Sum",
        ],
    },
    CuisineCategory {
        name: "European",
        tags: &[
            "Italian",
            "French",
            "Spanish",
            "Greek",
            "Portuguese",
            "German",
            "British",
            "Pizza",
            "Pasta",
        ],
    },
    CuisineCategory {
        name: "Americas",
        tags: &[
            "American",
            "Mexican",
            "Brazilian",
            "Peruvian",
            "Argentinian",
            "Burgers",
            "BBQ",
            "Tacos",
        ],
    },
    CuisineCategory {
        name: "Middle East & Africa",
        tags: &[
            "Lebanese",
            "Turkish",
            "Moroccan",
            "Ethiopian",
            "Israeli",
            "Persian",
            "Falafel",
        ],
    },
    CuisineCategory {
        name: "Cafes & Bakeries",
        tags: &["Coffee", "Brunch", "Bakery", "Desserts", "Ice Cream", "Pancakes"],
    },
    CuisineCategory {
        name: "Bars & Nightlife",
        tags: &[
            "Cocktails",
            "Wine Bar",
            "Craft Beer",
            "Rooftop",
            "Tapas",
            "Street Food",
        ],
    },
    CuisineCategory {
        name: "Dietary",
        tags: &[
            "Vegan",
            "Vegetarian",
            "Gluten-Free",
            "Halal",
            "Kosher",
            "Seafood",
            "Healthy",
        ],
    },
];

/// All catalog tags in panel order.
#[must_use]
pub fn all_tags() -> Vec<CuisineTag> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.tags.iter().map(|t| CuisineTag::new(t)))
        .collect()
}

/// Whether a tag is part of the catalog.
#[must_use]
pub fn is_known(tag: &CuisineTag) -> bool {
    CATEGORIES
        .iter()
        .any(|c| c.tags.iter().any(|t| *t == tag.as_str()))
}
