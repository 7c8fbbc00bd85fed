//! # Discount Rules
//!
//! The discount variants and the [`DiscountRule`] capability they share.
//!
//! ## Rule Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every rule: sku mismatch → 0, result never negative                   │
//! │                                                                         │
//! │  BuyOneGetOneFree     floor(qty / 2) × unit                            │
//! │                                                                         │
//! │  VolumeFixedPrice     qty ≥ min ? qty × unit − qty × fixed : 0         │
//! │                                                                         │
//! │  VolumeFraction       qty ≥ min ? qty × unit − round(qty × unit × f)   │
//! │                                 : 0        (f = charged fraction)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are built once by the [`factory`](crate::factory) and never change.
//! [`PricingRule`] is the closed set the factory produces; each variant also
//! implements [`DiscountRule`] on its own.

use serde::Serialize;

use crate::fraction::Fraction;
use crate::money::Money;
use crate::types::LineItem;

/// A promotion that can take money off a single line item.
pub trait DiscountRule {
    /// The SKU this rule targets.
    fn sku(&self) -> &str;

    /// Discount in cents for `item`. Always ≥ 0.
    fn discount_cents(&self, item: &LineItem) -> i64;
}

// =============================================================================
// Buy One Get One Free
// =============================================================================

/// Every second unit is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuyOneGetOneFree {
    pub sku: String,
}

impl BuyOneGetOneFree {
    pub fn new(sku: impl Into<String>) -> Self {
        BuyOneGetOneFree { sku: sku.into() }
    }
}

impl DiscountRule for BuyOneGetOneFree {
    fn sku(&self) -> &str {
        &self.sku
    }

    fn discount_cents(&self, item: &LineItem) -> i64 {
        if item.sku != self.sku {
            return 0;
        }

        let free_units = item.quantity / 2;
        item.unit_price().multiply_quantity(free_units).cents().max(0)
    }
}

// =============================================================================
// Volume Fixed Price
// =============================================================================

/// From `minimum_quantity` units on, every unit costs `fixed_price_cents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeFixedPrice {
    pub sku: String,
    pub minimum_quantity: i64,
    pub fixed_price_cents: i64,
}

impl VolumeFixedPrice {
    pub fn new(sku: impl Into<String>, minimum_quantity: i64, fixed_price_cents: i64) -> Self {
        VolumeFixedPrice {
            sku: sku.into(),
            minimum_quantity,
            fixed_price_cents,
        }
    }
}

impl DiscountRule for VolumeFixedPrice {
    fn sku(&self) -> &str {
        &self.sku
    }

    fn discount_cents(&self, item: &LineItem) -> i64 {
        if item.sku != self.sku || item.quantity < self.minimum_quantity {
            return 0;
        }

        let saving_per_unit = item.unit_price() - Money::from_cents(self.fixed_price_cents);

        saving_per_unit.multiply_quantity(item.quantity).cents().max(0)
    }
}

// =============================================================================
// Volume Fraction
// =============================================================================

/// From `minimum_quantity` units on, the customer pays `fraction` of the
/// normal price (2/3 means two thirds is charged).
///
/// The charged total is rounded once, half up, to the nearest cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeFraction {
    pub sku: String,
    pub minimum_quantity: i64,
    pub fraction: Fraction,
}

impl VolumeFraction {
    pub fn new(sku: impl Into<String>, minimum_quantity: i64, fraction: Fraction) -> Self {
        VolumeFraction {
            sku: sku.into(),
            minimum_quantity,
            fraction,
        }
    }
}

impl DiscountRule for VolumeFraction {
    fn sku(&self) -> &str {
        &self.sku
    }

    fn discount_cents(&self, item: &LineItem) -> i64 {
        if item.sku != self.sku || item.quantity < self.minimum_quantity {
            return 0;
        }

        let original_total = item.line_total();
        let discounted_total = Money::from_cents(self.fraction.apply_rounded(original_total.cents()));

        (original_total - discounted_total).cents().max(0)
    }
}

// =============================================================================
// Pricing Rule (closed set)
// =============================================================================

/// Any rule the factory can build.
///
/// Dispatch is decided once, when the factory picks the variant; no type
/// inspection happens while pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingRule {
    BuyOneGetOneFree(BuyOneGetOneFree),
    VolumeFixedPrice(VolumeFixedPrice),
    #[serde(rename = "fractional_percentage")]
    VolumeFraction(VolumeFraction),
}

impl PricingRule {
    pub fn buy_one_get_one_free(sku: impl Into<String>) -> Self {
        PricingRule::BuyOneGetOneFree(BuyOneGetOneFree::new(sku))
    }

    pub fn volume_fixed_price(
        sku: impl Into<String>,
        minimum_quantity: i64,
        fixed_price_cents: i64,
    ) -> Self {
        PricingRule::VolumeFixedPrice(VolumeFixedPrice::new(
            sku,
            minimum_quantity,
            fixed_price_cents,
        ))
    }

    pub fn volume_fraction(
        sku: impl Into<String>,
        minimum_quantity: i64,
        fraction: Fraction,
    ) -> Self {
        PricingRule::VolumeFraction(VolumeFraction::new(sku, minimum_quantity, fraction))
    }

    /// The configuration `type` string this rule is built from.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingRule::BuyOneGetOneFree(_) => "buy_one_get_one_free",
            PricingRule::VolumeFixedPrice(_) => "volume_fixed_price",
            PricingRule::VolumeFraction(_) => "fractional_percentage",
        }
    }

    fn as_rule(&self) -> &dyn DiscountRule {
        match self {
            PricingRule::BuyOneGetOneFree(rule) => rule,
            PricingRule::VolumeFixedPrice(rule) => rule,
            PricingRule::VolumeFraction(rule) => rule,
        }
    }
}

impl DiscountRule for PricingRule {
    fn sku(&self) -> &str {
        self.as_rule().sku()
    }

    fn discount_cents(&self, item: &LineItem) -> i64 {
        self.as_rule().discount_cents(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(sku: &str, unit_price_cents: i64, quantity: i64) -> LineItem {
        LineItem::new(sku, sku, unit_price_cents, quantity)
    }

    fn two_thirds() -> Fraction {
        "2/3".parse().unwrap()
    }

    #[test]
    fn test_bogo_floor_division() {
        let rule = BuyOneGetOneFree::new("GR1");

        assert_eq!(rule.discount_cents(&item("GR1", 311, 1)), 0);
        assert_eq!(rule.discount_cents(&item("GR1", 311, 2)), 311);
        assert_eq!(rule.discount_cents(&item("GR1", 311, 3)), 311);
        assert_eq!(rule.discount_cents(&item("GR1", 311, 4)), 622);
    }

    #[test]
    fn test_bogo_ignores_other_skus() {
        let rule = BuyOneGetOneFree::new("GR1");
        assert_eq!(rule.discount_cents(&item("SR1", 500, 4)), 0);
    }

    #[test]
    fn test_fixed_price_threshold() {
        let rule = VolumeFixedPrice::new("SR1", 3, 450);

        assert_eq!(rule.discount_cents(&item("SR1", 500, 2)), 0);
        assert_eq!(rule.discount_cents(&item("SR1", 500, 3)), 150);
        assert_eq!(rule.discount_cents(&item("SR1", 500, 5)), 250);
    }

    #[test]
    fn test_fixed_price_above_unit_price_clamps_to_zero() {
        let rule = VolumeFixedPrice::new("SR1", 1, 600);
        assert_eq!(rule.discount_cents(&item("SR1", 500, 3)), 0);
    }

    #[test]
    fn test_extreme_prices_do_not_overflow() {
        let fixed = VolumeFixedPrice::new("SR1", 2, 4_611_686_018_427_387_904);
        assert_eq!(fixed.discount_cents(&item("SR1", 500, 2)), 0);

        let cheap = VolumeFixedPrice::new("SR1", 1, 1);
        assert_eq!(cheap.discount_cents(&item("SR1", i64::MAX / 2, 3)), i64::MAX);

        let bogo = BuyOneGetOneFree::new("GR1");
        assert_eq!(bogo.discount_cents(&item("GR1", i64::MAX / 2, 6)), i64::MAX);
    }

    #[test]
    fn test_fraction_threshold() {
        let rule = VolumeFraction::new("CF1", 3, two_thirds());

        assert_eq!(rule.discount_cents(&item("CF1", 1123, 2)), 0);
        // 3369 charged at 2/3 = 2246
        assert_eq!(rule.discount_cents(&item("CF1", 1123, 3)), 1123);
        // 4492 × 2/3 = 2994.67 → 2995 charged
        assert_eq!(rule.discount_cents(&item("CF1", 1123, 4)), 1497);
    }

    #[test]
    fn test_fraction_rounds_half_up() {
        let half: Fraction = "1/2".parse().unwrap();
        let rule = VolumeFraction::new("X", 1, half);

        // 2.5 charged → 3, discount 2 (round-half-even would give 3)
        assert_eq!(rule.discount_cents(&item("X", 5, 1)), 2);
        // 7.5 charged → 8
        assert_eq!(rule.discount_cents(&item("X", 5, 3)), 7);
    }

    #[test]
    fn test_pricing_rule_dispatch() {
        let rules = [
            PricingRule::buy_one_get_one_free("GR1"),
            PricingRule::volume_fixed_price("SR1", 3, 450),
            PricingRule::volume_fraction("CF1", 3, two_thirds()),
        ];

        assert_eq!(rules[0].sku(), "GR1");
        assert_eq!(rules[1].kind(), "volume_fixed_price");
        assert_eq!(rules[0].discount_cents(&item("GR1", 311, 2)), 311);
        assert_eq!(rules[1].discount_cents(&item("SR1", 500, 3)), 150);
        assert_eq!(rules[2].discount_cents(&item("CF1", 1123, 3)), 1123);
    }

    #[test]
    fn test_pricing_rule_serializes_with_type_tag() {
        let json = serde_json::to_value(PricingRule::volume_fraction("CF1", 3, two_thirds()))
            .unwrap();
        assert_eq!(json["type"], "fractional_percentage");
        assert_eq!(json["sku"], "CF1");
        assert_eq!(json["fraction"], "2/3");
    }

    fn any_rule() -> impl Strategy<Value = PricingRule> {
        prop_oneof![
            Just(PricingRule::buy_one_get_one_free("A")),
            (1i64..10, 0i64..2_000)
                .prop_map(|(min, fixed)| PricingRule::volume_fixed_price("A", min, fixed)),
            (1i64..10, 1i64..50, 1i64..50).prop_map(|(min, n, d)| {
                PricingRule::volume_fraction("A", min, Fraction::new(n, d).unwrap())
            }),
        ]
    }

    proptest! {
        #[test]
        fn discount_is_never_negative(
            rule in any_rule(),
            price in 0i64..100_000,
            quantity in 1i64..1_000,
        ) {
            prop_assert!(rule.discount_cents(&item("A", price, quantity)) >= 0);
        }

        #[test]
        fn discount_is_zero_for_other_skus(
            rule in any_rule(),
            price in 0i64..100_000,
            quantity in 1i64..1_000,
        ) {
            prop_assert_eq!(rule.discount_cents(&item("B", price, quantity)), 0);
        }
    }
}
