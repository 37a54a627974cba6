use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A melon for sale. Immutable once the catalog is loaded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Melon {
    pub id: String,
    pub melon_type: String,
    pub common_name: String,
    pub price: Decimal,
    pub image_url: String,
    pub color: String,
    pub seedless: bool,
    pub description: String,
}

impl Melon {
    /// Price formatted for display, e.g. `$2.50`.
    pub fn price_str(&self) -> String {
        format_price(self.price)
    }
}

/// Any amount as dollars with two decimal places.
pub fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}
