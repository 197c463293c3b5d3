use bigdecimal::BigDecimal;
use diesel::prelude::AsChangeset;
use serde::Deserialize;

use crate::{error::FieldErrors, schema::payments};

use super::{money, payment_mode::PaymentMode, WriteMode};

#[derive(Deserialize, AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = payments)]
pub struct PaymentForm{
    #[serde(rename = "order")]
    pub order_id: Option<i32>,
    #[serde(default, deserialize_with = "money::deserialize_option")]
    pub amount: Option<BigDecimal>,
    pub payment_mode: Option<PaymentMode>
}

impl PaymentForm {
    pub fn validated(mut self, mode: WriteMode) -> Result<Self, FieldErrors>{
        let mut errors = FieldErrors::default();

        if mode.requires_all() {
            errors.require("order", &self.order_id);
            errors.require("amount", &self.amount);
            errors.require("payment_mode", &self.payment_mode);
        }

        if let Some(amount) = &self.amount {
            match money::parse_amount(amount) {
                Ok(a) => self.amount = Some(a),
                Err(e) => errors.add("amount", e)
            }
        }

        errors.into_result()?;
        Ok(self)
    }

    pub fn is_empty(&self) -> bool{
        self.order_id.is_none() && self.amount.is_none() && self.payment_mode.is_none()
    }
}
