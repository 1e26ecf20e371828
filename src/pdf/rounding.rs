//! Currency rounding applied before amounts reach a template.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::warn;

use crate::configuration::{ConfigKey, ShopConfiguration};
use crate::errors::ServiceError;
use crate::models::{SupplyOrder, SupplyOrderDetail};
use crate::queries::TaxOrderSummaryRow;

/// Decimal places of every amount printed on a document.
pub const PRICE_PRECISION: u32 = 2;

/// How a midpoint or a truncated digit is resolved.
///
/// Shop configuration stores the mode as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
pub enum RoundMode {
    /// Towards positive infinity (code 0)
    Up,
    /// Towards negative infinity (code 1)
    Down,
    /// Half away from zero (code 2)
    #[default]
    HalfUp,
    /// Half towards zero (code 3)
    HalfDown,
    /// Half to even (code 4)
    HalfEven,
}

impl RoundMode {
    pub fn code(self) -> u8 {
        match self {
            RoundMode::Up => 0,
            RoundMode::Down => 1,
            RoundMode::HalfUp => 2,
            RoundMode::HalfDown => 3,
            RoundMode::HalfEven => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RoundMode::Up),
            1 => Some(RoundMode::Down),
            2 => Some(RoundMode::HalfUp),
            3 => Some(RoundMode::HalfDown),
            4 => Some(RoundMode::HalfEven),
            _ => None,
        }
    }

    /// Mode configured for the shop; unset or unknown values use [`RoundMode::HalfUp`].
    pub fn from_configuration(config: &dyn ShopConfiguration) -> Self {
        let Some(raw) = config.get_non_empty(ConfigKey::PriceRoundMode) else {
            return RoundMode::default();
        };
        raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "unsupported price round mode, using half up");
            RoundMode::default()
        })
    }

    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundMode::Up => RoundingStrategy::ToPositiveInfinity,
            RoundMode::Down => RoundingStrategy::ToNegativeInfinity,
            RoundMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl FromStr for RoundMode {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(RoundMode::from_code)
            .ok_or_else(|| ServiceError::ConfigError(format!("unknown round mode: {}", s)))
    }
}

/// Rounds `value` to `precision` decimal places.
pub fn ps_round(value: Decimal, precision: u32, mode: RoundMode) -> Decimal {
    value.round_dp_with_strategy(precision, mode.strategy())
}

/// Rounds the printed fields of every line in place.
///
/// Covers unit_price_te, price_te, discount_rate, price_with_discount_te,
/// tax_rate and price_ti. Applying it twice changes nothing.
pub fn round_supply_order_details(details: &mut [SupplyOrderDetail], mode: RoundMode) {
    for detail in details.iter_mut() {
        detail.unit_price_te = ps_round(detail.unit_price_te, PRICE_PRECISION, mode);
        detail.price_te = ps_round(detail.price_te, PRICE_PRECISION, mode);
        detail.discount_rate = ps_round(detail.discount_rate, PRICE_PRECISION, mode);
        detail.price_with_discount_te =
            ps_round(detail.price_with_discount_te, PRICE_PRECISION, mode);
        detail.tax_rate = ps_round(detail.tax_rate, PRICE_PRECISION, mode);
        detail.price_ti = ps_round(detail.price_ti, PRICE_PRECISION, mode);
    }
}

/// Rounds the order totals in place.
pub fn round_supply_order(order: &mut SupplyOrder, mode: RoundMode) {
    order.total_te = ps_round(order.total_te, PRICE_PRECISION, mode);
    order.discount_value_te = ps_round(order.discount_value_te, PRICE_PRECISION, mode);
    order.total_with_discount_te = ps_round(order.total_with_discount_te, PRICE_PRECISION, mode);
    order.total_tax = ps_round(order.total_tax, PRICE_PRECISION, mode);
    order.total_ti = ps_round(order.total_ti, PRICE_PRECISION, mode);
}

pub fn round_tax_order_summary(rows: &mut [TaxOrderSummaryRow], mode: RoundMode) {
    for row in rows.iter_mut() {
        row.base_te = ps_round(row.base_te, PRICE_PRECISION, mode);
        row.tax_rate = ps_round(row.tax_rate, PRICE_PRECISION, mode);
        row.total_tax_value = ps_round(row.total_tax_value, PRICE_PRECISION, mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::InMemoryConfiguration;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(RoundMode::HalfUp, dec!(2.345), dec!(2.35))]
    #[case(RoundMode::HalfUp, dec!(-2.345), dec!(-2.35))]
    #[case(RoundMode::HalfDown, dec!(2.345), dec!(2.34))]
    #[case(RoundMode::HalfEven, dec!(2.345), dec!(2.34))]
    #[case(RoundMode::HalfEven, dec!(2.355), dec!(2.36))]
    #[case(RoundMode::Up, dec!(2.341), dec!(2.35))]
    #[case(RoundMode::Down, dec!(2.349), dec!(2.34))]
    #[case(RoundMode::Down, dec!(-2.341), dec!(-2.35))]
    fn rounds_with_mode(#[case] mode: RoundMode, #[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(ps_round(input, PRICE_PRECISION, mode), expected);
    }

    #[test]
    fn codes_round_trip() {
        for mode in RoundMode::iter() {
            assert_eq!(RoundMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(RoundMode::from_code(5), None);
    }

    #[test]
    fn mode_is_read_from_shop_configuration() {
        let config = InMemoryConfiguration::new().with(ConfigKey::PriceRoundMode, "4");
        assert_eq!(RoundMode::from_configuration(&config), RoundMode::HalfEven);

        let unknown = InMemoryConfiguration::new().with(ConfigKey::PriceRoundMode, "half");
        assert_eq!(RoundMode::from_configuration(&unknown), RoundMode::HalfUp);

        assert_eq!(
            RoundMode::from_configuration(&InMemoryConfiguration::new()),
            RoundMode::HalfUp
        );
    }

    #[test]
    fn summary_rows_are_rounded() {
        let mut rows = vec![TaxOrderSummaryRow {
            base_te: dec!(80.125),
            tax_rate: dec!(5.5),
            total_tax_value: dec!(4.406875),
        }];

        round_tax_order_summary(&mut rows, RoundMode::HalfUp);

        assert_eq!(rows[0].base_te, dec!(80.13));
        assert_eq!(rows[0].tax_rate, dec!(5.50));
        assert_eq!(rows[0].total_tax_value, dec!(4.41));
    }
}
