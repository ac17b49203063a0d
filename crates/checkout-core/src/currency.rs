//! Currency Formatting
//!
//! Reproduces en-US currency formatting (`currencyDisplay: symbol`) and
//! exposes the formatted output as typed parts, so callers can inspect its
//! shape instead of hardcoding lists of zero-decimal currencies.
//! Uses `rust_decimal` for all amounts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

const NO_BREAK_SPACE: &str = "\u{a0}";

/// Currencies the en-US formatter prints without fraction digits
const ZERO_DECIMAL: &[&str] = &[
    "ADP", "AFN", "ALL", "BIF", "BYR", "CLP", "COP", "DJF", "ESP", "GNF", "HUF", "IDR", "IQD",
    "IRR", "ISK", "ITL", "JPY", "KMF", "KPW", "KRW", "LAK", "LBP", "LUF", "MGA", "MGF", "MMK",
    "MRO", "PKR", "PYG", "RSD", "RWF", "SLL", "SOS", "STD", "SYP", "TMM", "TRL", "UGX", "UYI",
    "VND", "VUV", "XAF", "XOF", "XPF", "YER", "ZMK", "ZWD",
];

/// Currencies with three fraction digits
const THREE_DECIMAL: &[&str] = &["BHD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Currencies with four fraction digits
const FOUR_DECIMAL: &[&str] = &["CLF", "UYW"];

/// ISO 4217 currency code, always upper case
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parse a currency code, accepting any letter case
    pub fn parse(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(CheckoutError::InvalidCurrency(code.to_string()))
        }
    }

    /// US dollars
    pub fn usd() -> Self {
        Self("USD".into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Number of fraction digits the en-US formatter prints
    pub fn fraction_digits(&self) -> u32 {
        let code = self.0.as_str();
        if ZERO_DECIMAL.contains(&code) {
            0
        } else if THREE_DECIMAL.contains(&code) {
            3
        } else if FOUR_DECIMAL.contains(&code) {
            4
        } else {
            2
        }
    }

    /// Display symbol in the en-US locale; unknown codes display themselves
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "CAD" => "CA$",
            "AUD" => "A$",
            "NZD" => "NZ$",
            "HKD" => "HK$",
            "MXN" => "MX$",
            "TWD" => "NT$",
            "XCD" => "EC$",
            "BRL" => "R$",
            "CNY" => "CN¥",
            "INR" => "₹",
            "KRW" => "₩",
            "ILS" => "₪",
            "VND" => "₫",
            "PHP" => "₱",
            "XAF" => "FCFA",
            "XOF" => "F CFA",
            "XPF" => "CFPF",
            _ => self.0.as_str(),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = CheckoutError;

    fn try_from(code: String) -> Result<Self> {
        Self::parse(&code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl FromStr for Currency {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a formatted fragment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartKind {
    MinusSign,
    Currency,
    Literal,
    Integer,
    Group,
    Decimal,
    Fraction,
}

/// One fragment of a formatted amount
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatPart {
    pub kind: PartKind,
    pub value: String,
}

impl FormatPart {
    fn new(kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// en-US currency formatter
#[derive(Clone, Debug)]
pub struct CurrencyFormatter {
    currency: Currency,
}

impl CurrencyFormatter {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Format `value` (in major units) into typed parts.
    ///
    /// The value is rounded half away from zero to the currency's fraction
    /// digits; integer digits are grouped in threes.
    pub fn format_to_parts(&self, value: Decimal) -> Vec<FormatPart> {
        let digits = self.currency.fraction_digits();
        let mut rounded = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded.set_sign_positive(true);
        rounded.rescale(digits);

        let mut parts = Vec::new();
        if negative {
            parts.push(FormatPart::new(PartKind::MinusSign, "-"));
        }

        let symbol = self.currency.symbol();
        parts.push(FormatPart::new(PartKind::Currency, symbol));
        if symbol.chars().last().is_some_and(char::is_alphabetic) {
            parts.push(FormatPart::new(PartKind::Literal, NO_BREAK_SPACE));
        }

        let text = rounded.to_string();
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (text.as_str(), None),
        };

        for (i, group) in group_thousands(integer).into_iter().enumerate() {
            if i > 0 {
                parts.push(FormatPart::new(PartKind::Group, ","));
            }
            parts.push(FormatPart::new(PartKind::Integer, group));
        }

        if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
            parts.push(FormatPart::new(PartKind::Decimal, "."));
            parts.push(FormatPart::new(PartKind::Fraction, fraction));
        }

        parts
    }

    /// Format `value` (in major units) into a display string
    pub fn format(&self, value: Decimal) -> String {
        self.format_to_parts(value)
            .into_iter()
            .map(|part| part.value)
            .collect()
    }

    /// True when formatting `probe` yields no decimal separator
    pub fn is_zero_decimal(&self, probe: Decimal) -> bool {
        !self
            .format_to_parts(probe)
            .iter()
            .any(|part| part.kind == PartKind::Decimal)
    }
}

/// Split an ASCII digit string into groups of three, counted from the right
fn group_thousands(digits: &str) -> Vec<&str> {
    let head = digits.len() % 3;
    let mut groups = Vec::with_capacity(digits.len() / 3 + 1);
    if head > 0 {
        groups.push(&digits[..head]);
    }
    let mut start = head;
    while start < digits.len() {
        groups.push(&digits[start..start + 3]);
        start += 3;
    }
    groups
}

/// Format the total for `quantity` items priced at `amount`.
///
/// `amount` is interpreted in minor units unless formatting it shows no
/// decimal separator, in which case the currency is zero-decimal and the
/// amount is already in major units. The total is rounded to two places
/// before formatting. Quantity 0 is accepted and formats a zero total.
pub fn format_price(amount: i64, currency: &Currency, quantity: u32) -> String {
    let formatter = CurrencyFormatter::new(currency.clone());
    let amount = Decimal::from(amount);

    let unit = if formatter.is_zero_decimal(amount) {
        amount
    } else {
        amount / Decimal::ONE_HUNDRED
    };

    let total = (unit * Decimal::from(quantity))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    formatter.format(total)
}
