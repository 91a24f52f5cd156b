use serde::{Deserialize, Serialize};

/// One real-estate sale as read from a transaction dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub property_type: Option<String>,
    /// Sale price, or price per m² once normalized.
    pub price: Option<f64>,
    /// Built area in m². `None` for land-only sales.
    pub built_area: Option<f64>,
    pub postcode: Option<String>,
    pub commune: Option<String>,
    pub coordinates: Option<(f64, f64)>,
}

impl TransactionRecord {
    /// Price divided by built area, when the area is present and positive.
    pub fn price_per_area(&self) -> Option<f64> {
        match (self.price, self.built_area) {
            (Some(price), Some(area)) if area > 0.0 => Some(price / area),
            _ => None,
        }
    }
}
