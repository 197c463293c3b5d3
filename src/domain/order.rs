use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::error::FieldErrors;

use super::money;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItemRequest{
    pub product: i32,
    pub quantity: i32
}

// Body of POST /orders/. `amount` is optional, when present it has to match
// the total computed from current product prices
#[derive(Deserialize, Debug, Clone)]
pub struct OrderRequest{
    pub customer: i32,
    #[serde(default, deserialize_with = "money::deserialize_option")]
    pub amount: Option<BigDecimal>,
    pub items: Vec<OrderItemRequest>
}

impl OrderRequest {
    pub fn validated(mut self) -> Result<Self, FieldErrors>{
        let mut errors = FieldErrors::default();

        if self.items.is_empty() {
            errors.add("items", "This list may not be empty.");
        }

        for item in self.items.iter().filter(|item| item.quantity < 1) {
            errors.add(
                "items",
                format!("Quantity for product {} must be a positive integer.", item.product)
            );
        }

        if let Some(amount) = &self.amount {
            match money::parse_non_negative_amount(amount) {
                Ok(a) => self.amount = Some(a),
                Err(e) => errors.add("amount", e)
            }
        }

        errors.into_result()?;
        Ok(self)
    }
}
