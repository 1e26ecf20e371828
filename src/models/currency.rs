use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "currency")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_currency: i64,
    pub name: String,
    pub iso_code: String,
    pub sign: String,
    /// Put a space between the sign and the amount
    pub blank: bool,
    /// Display pattern, see [`PriceFormat`]
    pub format: i16,
    /// Whether amounts are displayed with cents
    pub decimals: bool,
    pub conversion_rate: Decimal,
    pub deleted: bool,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Amount layouts a currency can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceFormat {
    /// `X 0,000.00`
    SignFirstCommaThousands,
    /// `0 000,00 X`
    SignLastSpaceThousands,
    /// `X 0.000,00`
    SignFirstDotThousands,
    /// `0,000.00 X`
    SignLastCommaThousands,
    /// `X 0'000.00`
    SignFirstApostropheThousands,
}

impl PriceFormat {
    pub fn from_code(code: i16) -> Self {
        match code {
            2 => Self::SignLastSpaceThousands,
            3 => Self::SignFirstDotThousands,
            4 => Self::SignLastCommaThousands,
            5 => Self::SignFirstApostropheThousands,
            _ => Self::SignFirstCommaThousands,
        }
    }

    fn separators(self) -> (&'static str, &'static str) {
        match self {
            Self::SignFirstCommaThousands | Self::SignLastCommaThousands => (".", ","),
            Self::SignLastSpaceThousands => (",", " "),
            Self::SignFirstDotThousands => (",", "."),
            Self::SignFirstApostropheThousands => (".", "'"),
        }
    }

    fn sign_first(self) -> bool {
        !matches!(
            self,
            Self::SignLastSpaceThousands | Self::SignLastCommaThousands
        )
    }
}

impl Model {
    pub fn price_format(&self) -> PriceFormat {
        PriceFormat::from_code(self.format)
    }

    /// Formats an already rounded amount with this currency's sign and layout.
    pub fn format_price(&self, amount: Decimal) -> String {
        format_price(
            amount,
            &self.sign,
            self.price_format(),
            self.blank,
            if self.decimals { 2 } else { 0 },
        )
    }
}

pub fn format_price(
    amount: Decimal,
    sign: &str,
    format: PriceFormat,
    blank: bool,
    decimals: u32,
) -> String {
    let (decimal_point, thousands) = format.separators();
    let number = number_format(amount.abs(), decimals, decimal_point, thousands);
    let blank = if blank { " " } else { "" };

    let formatted = if format.sign_first() {
        format!("{}{}{}", sign, blank, number)
    } else {
        format!("{}{}{}", number, blank, sign)
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Fixed-decimals rendering with grouped thousands.
pub fn number_format(amount: Decimal, decimals: u32, decimal_point: &str, thousands: &str) -> String {
    let fixed = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, fixed);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let (negative, digits) = match int_part.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(thousands);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push_str(decimal_point);
        out.push_str(frac);
    }
    out
}
