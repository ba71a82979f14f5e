//! Tax configuration mirror.

use serde::{Deserialize, Serialize};

use super::Price;

/// The single active tax rate record.
///
/// The backend computes authoritative tax amounts; this record only drives the
/// tax line shown in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    /// Display name, e.g. "GST".
    pub name: String,
    /// Rate in percent, e.g. 18.0.
    pub rate: f64,
    /// When true, prices already include tax and no amount is added on top.
    #[serde(default)]
    pub inclusive: bool,
    #[serde(default)]
    pub active: bool,
}

impl TaxConfig {
    /// Display-only tax amount on a subtotal.
    ///
    /// Inclusive rates contribute nothing on top of the listed prices.
    #[must_use]
    pub fn tax_on(&self, subtotal: Price) -> Price {
        if !self.active || self.inclusive {
            return Price::ZERO;
        }
        subtotal.percent_of(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_tax_added_on_top() {
        let gst = TaxConfig {
            name: "GST".to_string(),
            rate: 18.0,
            inclusive: false,
            active: true,
        };
        assert_eq!(gst.tax_on(Price::from_paise(10000)), Price::from_paise(1800));
    }

    #[test]
    fn test_inclusive_tax_adds_nothing() {
        let gst = TaxConfig {
            name: "GST".to_string(),
            rate: 18.0,
            inclusive: true,
            active: true,
        };
        assert_eq!(gst.tax_on(Price::from_paise(10000)), Price::ZERO);
    }

    #[test]
    fn test_inactive_tax_adds_nothing() {
        let gst = TaxConfig {
            name: "GST".to_string(),
            rate: 18.0,
            inclusive: false,
            active: false,
        };
        assert_eq!(gst.tax_on(Price::from_paise(10000)), Price::ZERO);
    }
}
