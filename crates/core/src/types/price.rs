//! Integer minor-currency-unit price representation.
//!
//! All money in PawCart is carried as whole paise (1/100 of a rupee) to avoid
//! floating-point rounding in prices. The backend sends amounts the same way.

use serde::{Deserialize, Serialize};

/// A monetary amount in paise.
///
/// `Price::from_paise(10000)` displays as `₹100.00`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in paise.
    #[must_use]
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create a price from a rupee amount, rounding to the nearest paisa.
    ///
    /// `Price::from_rupees(100.5).as_paise()` is `10050`.
    #[must_use]
    pub fn from_rupees(rupees: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((rupees * 100.0).round() as i64)
    }

    /// The amount in paise.
    #[must_use]
    pub const fn as_paise(&self) -> i64 {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction, clamped at zero for display math.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        let diff = self.0.saturating_sub(other.0);
        Self(if diff < 0 { 0 } else { diff })
    }

    /// Multiply by a line-item quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Take a percentage of this amount, rounded to the nearest paisa.
    ///
    /// Used for display-only discount and tax estimates; the backend owns the
    /// authoritative computation.
    #[must_use]
    pub fn percent_of(self, percent: f64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        Self((self.0 as f64 * percent / 100.0).round() as i64)
    }

    /// The smaller of two amounts.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}\u{20b9}{}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_rupees() {
        assert_eq!(Price::from_paise(10000).to_string(), "₹100.00");
    }

    #[test]
    fn test_display_fractional() {
        assert_eq!(Price::from_paise(10050).to_string(), "₹100.50");
        assert_eq!(Price::from_paise(5).to_string(), "₹0.05");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Price::from_paise(-2500).to_string(), "-₹25.00");
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Price::from_rupees(100.5).as_paise(), 10050);
        assert_eq!(Price::from_rupees(0.1).as_paise(), 10);
        assert_eq!(Price::from_rupees(99.999).as_paise(), 10000);
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(Price::from_paise(2500).times(3).as_paise(), 7500);
    }

    #[test]
    fn test_percent_of_rounds() {
        assert_eq!(Price::from_paise(10000).percent_of(18.0).as_paise(), 1800);
        assert_eq!(Price::from_paise(999).percent_of(10.0).as_paise(), 100);
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let a = Price::from_paise(100);
        let b = Price::from_paise(500);
        assert_eq!(a.saturating_sub(b), Price::ZERO);
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_paise(10050);
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "10050");
        let back: Price = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, price);
    }
}
