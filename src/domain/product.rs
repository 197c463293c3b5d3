use bigdecimal::BigDecimal;
use diesel::prelude::{AsChangeset, Insertable};
use serde::Deserialize;
use validator::Validate;

use crate::{error::FieldErrors, schema::products};

use super::{money, trim_text, WriteMode};

#[derive(Deserialize, Validate, Insertable, AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = products)]
pub struct ProductForm{
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "money::deserialize_option")]
    pub price: Option<BigDecimal>,
    // Omitted stock falls back to the column default of 0
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub stock: Option<i32>
}

impl ProductForm {
    /// Validates the form and rounds the price to its stored two decimal places.
    pub fn validated(mut self, mode: WriteMode) -> Result<Self, FieldErrors>{
        trim_text(&mut self.name);
        let mut errors = FieldErrors::from_validator(self.validate());

        if mode.requires_all() {
            errors.require("name", &self.name);
            errors.require("price", &self.price);
        }

        if let Some(price) = &self.price {
            match money::parse_non_negative_amount(price) {
                Ok(p) => self.price = Some(p),
                Err(e) => errors.add("price", e)
            }
        }

        errors.into_result()?;
        Ok(self)
    }

    pub fn is_empty(&self) -> bool{
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }
}
