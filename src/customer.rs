//! Record types persisted by the store.
//!
//! Field names on disk are camelCase (`allergyInfo`). A customer without
//! allergy info omits the key entirely; `Some` with an empty list is written
//! as `"allergyInfo": {"allergens": []}`.

use serde::{Deserialize, Serialize};

/// One registry entry.
///
/// `id` is assigned by the caller and is the identity key for upserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Identity key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Loyalty coupon count.
    pub coupon: i64,
    /// Recorded allergens, if any were recorded at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergy_info: Option<AllergyInfo>,
}

impl Customer {
    /// A customer with no allergy info recorded.
    pub fn new(id: i64, name: impl Into<String>, coupon: i64) -> Self {
        Self {
            id,
            name: name.into(),
            coupon,
            allergy_info: None,
        }
    }

    /// Attach an allergen list (possibly empty).
    #[must_use]
    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergy_info = Some(AllergyInfo::new(allergens));
        self
    }

    /// `true` if `allergen` is in this customer's allergy list.
    #[must_use]
    pub fn is_allergic_to(&self, allergen: &str) -> bool {
        self.allergy_info
            .as_ref()
            .is_some_and(|info| info.contains(allergen))
    }
}

/// Ordered allergen names. Duplicates are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergyInfo {
    /// Allergen names in insertion order.
    pub allergens: Vec<String>,
}

impl AllergyInfo {
    /// Build from anything string-ish.
    pub fn new<I, S>(allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allergens: allergens.into_iter().map(Into::into).collect(),
        }
    }

    /// `true` if `allergen` appears at least once.
    #[must_use]
    pub fn contains(&self, allergen: &str) -> bool {
        self.allergens.iter().any(|a| a == allergen)
    }
}
