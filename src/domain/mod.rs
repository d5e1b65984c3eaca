//! Strongly typed identifiers for the discovery domain.
//!
//! Newtype wrappers keep city, restaurant and video ids from being mixed up
//! at call sites that otherwise all traffic in `i64`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self::new(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(CityId, "Unique identifier of a city row.");
entity_id!(RestaurantId, "Unique identifier of a restaurant row.");
entity_id!(VideoId, "Unique identifier of a video-reference row.");

/// A cuisine tag in canonical form.
///
/// Canonicalisation trims surrounding whitespace; matching is exact on the
/// canonical string, so `"Italian"` and `"italian"` are distinct tags. The
/// catalog is the source of spelling truth, backend rows merely reference it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuisineTag(String);

impl CuisineTag {
    #[must_use]
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CuisineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CuisineTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for CuisineTag {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_conversions() {
        let id = CityId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
        assert_eq!(CityId::from(42), id);
    }

    #[test]
    fn ids_compare_within_one_type() {
        assert_eq!(RestaurantId::new(1), RestaurantId::new(1));
        assert_ne!(VideoId::new(1), VideoId::new(2));
    }

    #[test]
    fn cuisine_tag_trims_whitespace() {
        assert_eq!(CuisineTag::new("  Italian "), CuisineTag::new("Italian"));
        assert_eq!(CuisineTag::new("Italian").as_str(), "Italian");
    }

    #[test]
    fn cuisine_tag_is_case_sensitive() {
        assert_ne!(CuisineTag::new("italian"), CuisineTag::new("Italian"));
    }

    #[test]
    fn id_serialization_is_transparent() {
        let id = RestaurantId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: RestaurantId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
