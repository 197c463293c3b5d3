use diesel::prelude::{AsChangeset, Insertable};
use serde::Deserialize;

use crate::{error::FieldErrors, schema::product_suppliers};

use super::WriteMode;

#[derive(Deserialize, Insertable, AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = product_suppliers)]
pub struct ProductSupplierForm{
    #[serde(rename = "product")]
    pub product_id: Option<i32>,
    #[serde(rename = "supplier")]
    pub supplier_id: Option<i32>
}

impl ProductSupplierForm {
    pub fn check(&self, mode: WriteMode) -> Result<(), FieldErrors>{
        let mut errors = FieldErrors::default();

        if mode.requires_all() {
            errors.require("product", &self.product_id);
            errors.require("supplier", &self.supplier_id);
        }

        errors.into_result()
    }

    pub fn is_empty(&self) -> bool{
        self.product_id.is_none() && self.supplier_id.is_none()
    }
}
