use diesel::prelude::{AsChangeset, Insertable};
use serde::Deserialize;
use validator::Validate;

use crate::{error::FieldErrors, schema::suppliers};

use super::{trim_text, WriteMode};

#[derive(Deserialize, Validate, Insertable, AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = suppliers)]
pub struct SupplierForm{
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 15, message = "Contact must be between 1 and 15 characters."))]
    pub contact: Option<String>
}

impl SupplierForm {
    pub fn validated(mut self, mode: WriteMode) -> Result<Self, FieldErrors>{
        trim_text(&mut self.name);
        trim_text(&mut self.contact);

        self.check(mode)?;
        Ok(self)
    }

    pub fn check(&self, mode: WriteMode) -> Result<(), FieldErrors>{
        let mut errors = FieldErrors::from_validator(self.validate());

        if mode.requires_all() {
            errors.require("name", &self.name);
            errors.require("contact", &self.contact);
        }

        errors.into_result()
    }

    pub fn is_empty(&self) -> bool{
        self.name.is_none() && self.contact.is_none()
    }
}
