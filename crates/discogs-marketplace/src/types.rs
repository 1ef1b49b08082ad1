//! Response types for the Discogs marketplace API
//!
//! # Design Principles
//! 1. All field names match the remote wire format exactly
//! 2. Money is `Decimal`, decoded from the raw JSON number text (no f64 round trip)
//! 3. Absence is explicit: optional nested values are `Option<_>` per field
//! 4. Listing fields missing or `null` in a payload decode to their zero value
//!    (price suggestions and stats only carry the price part of a listing)
//! 5. Unknown fields are ignored; wrong JSON types, including arrays where an
//!    object belongs, are decode errors
//!
//! # Sources
//! - Listing: https://www.discogs.com/developers/#page:marketplace,header:marketplace-listing
//! - Price Suggestions: https://www.discogs.com/developers/#page:marketplace,header:marketplace-price-suggestions
//! - Release Statistics: https://www.discogs.com/developers/#page:marketplace,header:marketplace-release-statistics

use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Listing
// ============================================================================

/// Monetary amount in the currency requested via `curr_abbr`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// ISO code, e.g. "USD"
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(
        default,
        deserialize_with = "decimal_or_zero",
        serialize_with = "rust_decimal::serde::arbitrary_precision::serialize"
    )]
    pub value: Decimal,
}

/// A single seller's offer for a release
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// "For Sale", "Draft", "Expired", ...
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "object_or_default")]
    pub price: Price,
    /// Media condition, e.g. "Mint (M)"
    #[serde(deserialize_with = "null_as_default")]
    pub condition: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sleeve_condition: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ships_from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
}

// ============================================================================
// Grading
// ============================================================================

/// Media grading quality, best first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "Mint (M)")]
    Mint,
    #[serde(rename = "Near Mint (NM or M-)")]
    NearMint,
    #[serde(rename = "Very Good Plus (VG+)")]
    VeryGoodPlus,
    #[serde(rename = "Very Good (VG)")]
    VeryGood,
    #[serde(rename = "Good Plus (G+)")]
    GoodPlus,
    #[serde(rename = "Good (G)")]
    Good,
    #[serde(rename = "Fair (F)")]
    Fair,
    #[serde(rename = "Poor (P)")]
    Poor,
}

impl Grade {
    pub const ALL: [Grade; 8] = [
        Grade::Mint,
        Grade::NearMint,
        Grade::VeryGoodPlus,
        Grade::VeryGood,
        Grade::GoodPlus,
        Grade::Good,
        Grade::Fair,
        Grade::Poor,
    ];

    /// Label as used by the API (price suggestion keys, listing conditions)
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Mint => "Mint (M)",
            Grade::NearMint => "Near Mint (NM or M-)",
            Grade::VeryGoodPlus => "Very Good Plus (VG+)",
            Grade::VeryGood => "Very Good (VG)",
            Grade::GoodPlus => "Good Plus (G+)",
            Grade::Good => "Good (G)",
            Grade::Fair => "Fair (F)",
            Grade::Poor => "Poor (P)",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grade '{0}'")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    /// Accepts the full API label or the short code ("VG+", "NM", "M-", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(grade) = Grade::ALL.iter().find(|g| g.label() == s) {
            return Ok(*grade);
        }
        match s.to_uppercase().as_str() {
            "M" => Ok(Grade::Mint),
            "NM" | "M-" => Ok(Grade::NearMint),
            "VG+" => Ok(Grade::VeryGoodPlus),
            "VG" => Ok(Grade::VeryGood),
            "G+" => Ok(Grade::GoodPlus),
            "G" => Ok(Grade::Good),
            "F" => Ok(Grade::Fair),
            "P" => Ok(Grade::Poor),
            _ => Err(UnknownGrade(s.to_string())),
        }
    }
}

// ============================================================================
// Price Suggestions
// ============================================================================

/// Suggested listing per grading quality.
///
/// `near_mint` is expected on every response; the other grades may be
/// absent. Absence of `near_mint` is tolerated on decode, and the key is
/// always written back (as `null` when absent).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceListing {
    #[serde(
        rename = "Mint (M)",
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub mint: Option<Listing>,
    #[serde(rename = "Near Mint (NM or M-)", default, deserialize_with = "optional_object")]
    pub near_mint: Option<Listing>,
    #[serde(
        rename = "Very Good Plus (VG+)",
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub very_good_plus: Option<Listing>,
    #[serde(
        rename = "Very Good (VG)",
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub very_good: Option<Listing>,
    #[serde(
        rename = "Good Plus (G+)",
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub good_plus: Option<Listing>,
    #[serde(
        rename = "Good (G)",
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub good: Option<Listing>,
    #[serde(
        rename = "Fair (F)",
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub fair: Option<Listing>,
    #[serde(
        rename = "Poor (P)",
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub poor: Option<Listing>,
}

impl PriceListing {
    pub fn get(&self, grade: Grade) -> Option<&Listing> {
        match grade {
            Grade::Mint => self.mint.as_ref(),
            Grade::NearMint => self.near_mint.as_ref(),
            Grade::VeryGoodPlus => self.very_good_plus.as_ref(),
            Grade::VeryGood => self.very_good.as_ref(),
            Grade::GoodPlus => self.good_plus.as_ref(),
            Grade::Good => self.good.as_ref(),
            Grade::Fair => self.fair.as_ref(),
            Grade::Poor => self.poor.as_ref(),
        }
    }

    /// Present grades, best first
    pub fn iter(&self) -> impl Iterator<Item = (Grade, &Listing)> + '_ {
        Grade::ALL.into_iter().filter_map(|g| self.get(g).map(|l| (g, l)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

// ============================================================================
// Release Statistics
// ============================================================================

/// Marketplace summary for a release
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// `null` when nothing is for sale
    #[serde(default, deserialize_with = "optional_object")]
    pub lowest_price: Option<Listing>,
    #[serde(rename = "num_for_sale", default, deserialize_with = "null_as_default")]
    pub for_sale: i64,
    #[serde(rename = "blocked_from_sale", default, deserialize_with = "null_as_default")]
    pub blocked: bool,
}

// ============================================================================
// Field decoders
// ============================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(rust_decimal::serde::arbitrary_precision_option::deserialize(deserializer)?
        .unwrap_or_default())
}

/// Derived struct impls also accept JSON arrays; nested listings must be objects
fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Map<String, Value>>::deserialize(deserializer)? {
        Some(map) => serde_json::from_value(Value::Object(map)).map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}

fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(optional_object(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_listing() {
        let json = r#"{
            "id": 1,
            "title": "Test",
            "status": "For Sale",
            "price": {"currency": "USD", "value": 9.99},
            "condition": "Mint (M)",
            "sleeve_condition": "Near Mint (NM or M-)",
            "ships_from": "Germany",
            "comments": "Sealed",
            "location": "Shelf A",
            "posted": "2024-01-01T00:00:00-08:00"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, 1);
        assert_eq!(listing.title, "Test");
        assert_eq!(listing.status, "For Sale");
        assert_eq!(listing.price, Price { currency: "USD".to_string(), value: dec("9.99") });
        assert_eq!(listing.sleeve_condition, "Near Mint (NM or M-)");
        assert_eq!(listing.ships_from, "Germany");
        assert_eq!(listing.location, "Shelf A");
    }

    #[test]
    fn test_parse_partial_listing() {
        let listing: Listing =
            serde_json::from_str(r#"{"currency": "EUR", "value": 3.5}"#).unwrap();
        assert_eq!(listing, Listing::default());

        let listing: Listing = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(listing.id, 7);
        assert!(listing.title.is_empty());
    }

    #[test]
    fn test_listing_wrong_type_is_error() {
        assert!(serde_json::from_str::<Listing>(r#"{"id": "seven"}"#).is_err());
        assert!(serde_json::from_str::<Listing>(r#"{"price": "9.99"}"#).is_err());
        assert!(serde_json::from_str::<Listing>(r#"{"price": []}"#).is_err());
    }

    #[test]
    fn test_nested_listing_array_is_error() {
        assert!(serde_json::from_str::<Stats>(r#"{"lowest_price": []}"#).is_err());
        assert!(serde_json::from_str::<PriceListing>(r#"{"Mint (M)": [1, 2]}"#).is_err());
        assert!(serde_json::from_str::<PriceListing>(r#"{"Near Mint (NM or M-)": []}"#).is_err());
    }

    #[test]
    fn test_null_fields_decode_to_zero_values() {
        let json = r#"{
            "id": null,
            "title": "T",
            "status": null,
            "price": {"currency": null, "value": null},
            "condition": null,
            "sleeve_condition": null,
            "ships_from": null,
            "comments": null,
            "location": null
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing, Listing { title: "T".to_string(), ..Default::default() });

        let listing: Listing = serde_json::from_str(r#"{"id": 1, "price": null}"#).unwrap();
        assert_eq!(listing.id, 1);
        assert_eq!(listing.price, Price::default());
    }

    #[test]
    fn test_price_keeps_exact_decimal() {
        let price: Price =
            serde_json::from_str(r#"{"currency": "USD", "value": 12345678901234567.89}"#).unwrap();
        assert_eq!(price.value, dec("12345678901234567.89"));

        let a: Price = serde_json::from_str(r#"{"value": 0.1}"#).unwrap();
        let b: Price = serde_json::from_str(r#"{"value": 0.2}"#).unwrap();
        assert_eq!(a.value + b.value, dec("0.3"));
    }

    #[test]
    fn test_price_serializes_as_json_number() {
        let price = Price { currency: "EUR".to_string(), value: dec("12345678901234567.89") };
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"currency":"EUR","value":12345678901234567.89}"#);
    }

    #[test]
    fn test_parse_stats_blocked() {
        let json = r#"{"lowest_price": null, "num_for_sale": 0, "blocked_from_sale": true}"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats, Stats { lowest_price: None, for_sale: 0, blocked: true });
    }

    #[test]
    fn test_parse_stats_with_lowest_price() {
        let json = r#"{
            "lowest_price": {"currency": "USD", "value": 2.09},
            "num_for_sale": 26,
            "blocked_from_sale": false
        }"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        let lowest = stats.lowest_price.unwrap();
        assert_eq!(lowest.id, 0);
        assert_eq!(stats.for_sale, 26);
        assert!(!stats.blocked);
    }

    #[test]
    fn test_parse_stats_null_count() {
        let stats: Stats = serde_json::from_str(r#"{"num_for_sale": null}"#).unwrap();
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_parse_stats_all_null() {
        let json = r#"{"lowest_price": null, "num_for_sale": null, "blocked_from_sale": null}"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_parse_price_listing() {
        let json = r#"{
            "Near Mint (NM or M-)": {"price": {"currency": "USD", "value": 12.5}},
            "Very Good Plus (VG+)": {"price": {"currency": "USD", "value": 9.75}}
        }"#;
        let suggestions: PriceListing = serde_json::from_str(json).unwrap();

        assert_eq!(suggestions.get(Grade::NearMint).unwrap().price.value, dec("12.5"));
        assert_eq!(suggestions.get(Grade::VeryGoodPlus).unwrap().price.value, dec("9.75"));
        assert!(suggestions.get(Grade::Mint).is_none());

        let grades: Vec<Grade> = suggestions.iter().map(|(g, _)| g).collect();
        assert_eq!(grades, vec![Grade::NearMint, Grade::VeryGoodPlus]);
        assert!(!suggestions.is_empty());
    }

    #[test]
    fn test_price_listing_without_near_mint() {
        let json = r#"{"Mint (M)": {"price": {"currency": "USD", "value": 30}}}"#;
        let suggestions: PriceListing = serde_json::from_str(json).unwrap();
        assert_eq!(suggestions.near_mint, None);
        assert_eq!(suggestions.mint.unwrap().price.value, dec("30"));

        let suggestions: PriceListing = serde_json::from_str("{}").unwrap();
        assert_eq!(suggestions.near_mint, None);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_price_listing_serialization_keeps_near_mint() {
        let json = serde_json::to_string(&PriceListing::default()).unwrap();
        assert_eq!(json, r#"{"Near Mint (NM or M-)":null}"#);

        let suggestions = PriceListing { fair: Some(Listing::default()), ..Default::default() };
        let json = serde_json::to_string(&suggestions).unwrap();
        assert!(json.contains("Fair (F)"));
        assert!(!json.contains("Poor (P)"));
    }

    #[test]
    fn test_grade_labels_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(grade.label().parse::<Grade>().unwrap(), grade);
        }
        assert_eq!("vg+".parse::<Grade>().unwrap(), Grade::VeryGoodPlus);
        assert_eq!("M-".parse::<Grade>().unwrap(), Grade::NearMint);
        assert_eq!("Excellent".parse::<Grade>(), Err(UnknownGrade("Excellent".to_string())));
    }

    #[test]
    fn test_grade_order_best_first() {
        assert!(Grade::Mint < Grade::NearMint);
        assert!(Grade::Fair < Grade::Poor);
        assert_eq!(Grade::GoodPlus.to_string(), "Good Plus (G+)");
    }

    #[test]
    fn test_grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::VeryGood).unwrap(), r#""Very Good (VG)""#);
        let grade: Grade = serde_json::from_str(r#""Fair (F)""#).unwrap();
        assert_eq!(grade, Grade::Fair);
    }
}
