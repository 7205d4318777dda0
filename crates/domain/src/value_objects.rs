//! Self-validating value objects for the inventory domain.
//!
//! Each value object validates on construction and is immutable afterward;
//! an invalid value fails with a [`ValueError`] rather than producing the
//! object. Deserialization goes through the same validation via `try_from`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures raised by value object constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A required string value was empty or whitespace-only.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A string value fell outside its allowed character length range.
    #[error("{field} must be between {min} and {max} characters")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },

    /// A numeric value fell outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
    },

    /// A numeric value was negative where only non-negative values are allowed.
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },
}

fn validate_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValueError> {
    if value.trim().is_empty() {
        return Err(ValueError::Empty { field });
    }
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValueError::LengthOutOfRange { field, min, max });
    }
    Ok(())
}

/// A product title, 3 to 40 characters, not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Minimum title length in characters (inclusive).
    pub const MIN_LEN: usize = 3;
    /// Maximum title length in characters (inclusive).
    pub const MAX_LEN: usize = 40;

    /// Creates a validated title.
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();
        validate_text("Product title", &value, Self::MIN_LEN, Self::MAX_LEN)?;
        Ok(Self(value))
    }

    /// Returns the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercased, trimmed form used for uniqueness checks.
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Title {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

/// A monetary price in the smallest currency unit, 0 to 10,000,000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Price(i32);

impl Price {
    /// Minimum price (inclusive).
    pub const MIN: i32 = 0;
    /// Maximum price (inclusive).
    pub const MAX: i32 = 10_000_000;

    /// Creates a validated price.
    pub fn new(value: i32) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                field: "Price",
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw price value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Price {
    type Error = ValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for i32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// A discount percentage, 0 to 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Discount(i32);

impl Discount {
    /// Minimum discount percentage (inclusive).
    pub const MIN: i32 = 0;
    /// Maximum discount percentage (inclusive).
    pub const MAX: i32 = 100;

    /// Creates a validated discount percentage.
    pub fn new(value: i32) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                field: "Discount",
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw percentage value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Calculates the discount amount for a given original price.
    ///
    /// Integer arithmetic, rounding toward zero: `price * discount / 100`.
    pub fn discount_amount(&self, original_price: Price) -> i32 {
        original_price.value() * self.0 / 100
    }
}

impl std::fmt::Display for Discount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<i32> for Discount {
    type Error = ValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Discount> for i32 {
    fn from(discount: Discount) -> Self {
        discount.0
    }
}

/// A non-negative inventory count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct InventoryCount(i32);

impl InventoryCount {
    /// Creates a validated inventory count.
    pub fn new(value: i32) -> Result<Self, ValueError> {
        if value < 0 {
            return Err(ValueError::Negative {
                field: "Inventory count",
            });
        }
        Ok(Self(value))
    }

    /// Returns a count of zero, the starting stock for new products.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw count.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for InventoryCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for InventoryCount {
    type Error = ValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InventoryCount> for i32 {
    fn from(count: InventoryCount) -> Self {
        count.0
    }
}

/// A user's display name, 2 to 15 characters, not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Minimum name length in characters (inclusive).
    pub const MIN_LEN: usize = 2;
    /// Maximum name length in characters (inclusive).
    pub const MAX_LEN: usize = 15;

    /// Creates a validated user name.
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();
        validate_text("User's name", &value, Self::MIN_LEN, Self::MAX_LEN)?;
        Ok(Self(value))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserName {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_accepts_inclusive_bounds() {
        assert!(Title::new("abc").is_ok());
        assert!(Title::new("a".repeat(40)).is_ok());
    }

    #[test]
    fn title_rejects_blank_and_out_of_range() {
        assert_eq!(
            Title::new("   "),
            Err(ValueError::Empty {
                field: "Product title"
            })
        );
        assert!(Title::new("ab").is_err());
        assert!(Title::new("a".repeat(41)).is_err());
    }

    #[test]
    fn title_normalizes_case_and_whitespace() {
        let title = Title::new("  Widget Pro ").unwrap();
        assert_eq!(title.normalized(), "widget pro");
        assert_eq!(title.as_str(), "  Widget Pro ");
    }

    #[test]
    fn price_enforces_documented_range() {
        assert!(Price::new(0).is_ok());
        assert!(Price::new(10_000_000).is_ok());
        assert!(Price::new(-1).is_err());
        assert!(Price::new(10_000_001).is_err());
    }

    #[test]
    fn discount_accepts_full_inclusive_range() {
        assert!(Discount::new(0).is_ok());
        assert!(Discount::new(100).is_ok());
        assert!(Discount::new(-1).is_err());
        assert!(Discount::new(101).is_err());
    }

    #[test]
    fn discount_amount_floors_toward_zero() {
        let discount = Discount::new(10).unwrap();
        assert_eq!(discount.discount_amount(Price::new(98_000).unwrap()), 9_800);

        let odd = Discount::new(33).unwrap();
        assert_eq!(odd.discount_amount(Price::new(10).unwrap()), 3);
    }

    #[test]
    fn inventory_count_rejects_negative() {
        assert!(InventoryCount::new(0).is_ok());
        assert_eq!(
            InventoryCount::new(-1),
            Err(ValueError::Negative {
                field: "Inventory count"
            })
        );
    }

    #[test]
    fn user_name_bounds() {
        assert!(UserName::new("Al").is_ok());
        assert!(UserName::new("a".repeat(15)).is_ok());
        assert!(UserName::new("a").is_err());
        assert!(UserName::new("a".repeat(16)).is_err());
        assert!(UserName::new(" ").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<Discount, _> = serde_json::from_str("50");
        assert_eq!(ok.unwrap().value(), 50);

        let bad: Result<Discount, _> = serde_json::from_str("101");
        assert!(bad.is_err());

        let bad_title: Result<Title, _> = serde_json::from_str("\"ab\"");
        assert!(bad_title.is_err());
    }

    #[test]
    fn serialization_is_transparent() {
        let price = Price::new(1234).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "1234");

        let title = Title::new("Widget").unwrap();
        assert_eq!(serde_json::to_string(&title).unwrap(), "\"Widget\"");
    }
}
