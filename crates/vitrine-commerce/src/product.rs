//! Product snapshot types.
//!
//! Stores capture a `ProductRef` by value at mutation time and never
//! consult the catalog again: later catalog edits do not retroactively
//! mutate cart, wishlist, or comparison entries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::pricing::{Money, VatRate};

/// A unique product identifier.
///
/// Newtype over the catalog's string id so it cannot be confused with a
/// SKU or any other string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Create an ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A product attribute value: free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// An immutable snapshot of a catalog product, as handed over by a
/// product card, modal, or page when it calls a store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Catalog product identifier.
    pub id: ProductId,
    /// Stock keeping unit.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Tax-exclusive price at capture time.
    pub price_ht: Money,
    /// VAT rate at capture time.
    pub vat_rate: VatRate,
    /// Primary image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Brand name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Category slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form attributes (ordered so snapshots serialize
    /// deterministically).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl ProductRef {
    /// Create a snapshot with the required fields; optional presentation
    /// fields start empty.
    pub fn new(
        id: impl Into<ProductId>,
        sku: impl Into<String>,
        name: impl Into<String>,
        price_ht: Money,
        vat_rate: VatRate,
    ) -> Self {
        Self {
            id: id.into(),
            sku: sku.into(),
            name: name.into(),
            price_ht,
            vat_rate,
            image: None,
            brand: None,
            category: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add an attribute.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The tax-inclusive unit price.
    pub fn price_ttc(&self) -> Result<Money, CommerceError> {
        self.price_ht.with_vat(self.vat_rate)
    }

    /// Whether this snapshot satisfies the price-engine contract.
    ///
    /// Rehydration uses this to discard entries from corrupted persisted
    /// state (a negative price or an empty id).
    pub fn is_valid(&self) -> bool {
        !self.id.as_str().is_empty() && self.price_ht.cents >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::Currency;

    fn mower() -> ProductRef {
        ProductRef::new(
            "42",
            "SKU-42",
            "Robot Mower",
            Money::new(249_900, Currency::EUR),
            VatRate::STANDARD_FR,
        )
    }

    #[test]
    fn test_price_ttc() {
        assert_eq!(mower().price_ttc().unwrap().cents, 299_880);
    }

    #[test]
    fn test_builder_fields() {
        let p = mower()
            .with_image("https://cdn.example.com/mower.webp")
            .with_brand("Husqvarna")
            .with_attribute("cutting_width_cm", 22.0)
            .with_attribute("color", "grey");

        assert_eq!(p.image.as_deref(), Some("https://cdn.example.com/mower.webp"));
        assert_eq!(p.brand.as_deref(), Some("Husqvarna"));
        assert_eq!(
            p.attributes.get("color"),
            Some(&AttributeValue::Text("grey".to_string()))
        );
    }

    #[test]
    fn test_is_valid_rejects_negative_price() {
        let mut p = mower();
        assert!(p.is_valid());
        p.price_ht = Money::new(-1, Currency::EUR);
        assert!(!p.is_valid());
    }

    #[test]
    fn test_is_valid_rejects_empty_id() {
        let mut p = mower();
        p.id = ProductId::new("");
        assert!(!p.is_valid());
    }

    #[test]
    fn test_serde_round_trip() {
        let p = mower().with_attribute("weight_kg", 9.4);
        let json = serde_json::to_string(&p).unwrap();
        let back: ProductRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_attribute_value_untagged() {
        let json = r#"{"size": "XL", "weight_kg": 9.4}"#;
        let attrs: BTreeMap<String, AttributeValue> = serde_json::from_str(json).unwrap();
        assert_eq!(attrs["size"], AttributeValue::Text("XL".to_string()));
        assert_eq!(attrs["weight_kg"], AttributeValue::Number(9.4));
    }
}
