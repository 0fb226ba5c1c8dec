//! Cart line records.

use serde::{Deserialize, Serialize};

use crate::{Price, Sku};

/// One entry in the cart: a product plus its resolved sale price.
///
/// This is also the persisted layout, so field names follow the stored
/// `{ "sku", "name", "salePrice" }` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog identifier of the purchased item.
    pub sku: Sku,
    /// Display title at the time the line was added.
    pub name: String,
    /// Sale price at the time the line was added.
    pub sale_price: Price,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub fn new(sku: Sku, name: impl Into<String>, sale_price: Price) -> Self {
        Self {
            sku,
            name: name.into(),
            sale_price,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_field_names() {
        let line = CartLine::new(Sku::parse("MLB1").unwrap(), "PC", Price::from_units(1000));
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["sku"], "MLB1");
        assert_eq!(json["name"], "PC");
        assert_eq!(json["salePrice"].as_f64(), Some(1000.0));
    }

    #[test]
    fn test_deserialize_stored_line() {
        let line: CartLine =
            serde_json::from_str(r#"{"sku":"MLB2","name":"Mouse","salePrice":59.9}"#).unwrap();
        assert_eq!(line.sku.as_str(), "MLB2");
        assert_eq!(line.sale_price.to_string(), "59.9");
    }

    #[test]
    fn test_deserialize_rejects_missing_price() {
        assert!(serde_json::from_str::<CartLine>(r#"{"sku":"MLB2","name":"Mouse"}"#).is_err());
    }
}
