//! Shipping address.

use serde::{Deserialize, Serialize};

/// A shipping address, validated only at form level on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: String,
    pub phone: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl Address {
    /// Single-line rendering for order summaries.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![self.line1.as_str()];
        if let Some(line2) = &self.line2 {
            parts.push(line2);
        }
        parts.push(&self.city);
        parts.push(&self.state);
        parts.push(&self.pincode);
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_skips_missing_line2() {
        let address = Address {
            name: "A Kumar".to_string(),
            phone: "9876543210".to_string(),
            line1: "12 MG Road".to_string(),
            line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        };
        assert_eq!(address.summary(), "12 MG Road, Bengaluru, Karnataka, 560001");
    }
}
