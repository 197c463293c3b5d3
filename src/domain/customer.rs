use diesel::prelude::{AsChangeset, Insertable};
use serde::Deserialize;
use validator::Validate;

use crate::{error::FieldErrors, schema::customers};

use super::{trim_text, WriteMode};

#[derive(Deserialize, Validate, Insertable, AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = customers)]
pub struct CustomerForm{
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 15, message = "Phone must be between 1 and 15 characters."))]
    pub phone: Option<String>
}

impl CustomerForm {
    /// Trims every text field, then checks the form for the given write mode.
    pub fn validated(mut self, mode: WriteMode) -> Result<Self, FieldErrors>{
        trim_text(&mut self.name);
        trim_text(&mut self.address);
        trim_text(&mut self.phone);

        self.check(mode)?;
        Ok(self)
    }

    pub fn check(&self, mode: WriteMode) -> Result<(), FieldErrors>{
        let mut errors = FieldErrors::from_validator(self.validate());

        if mode.requires_all() {
            errors.require("name", &self.name);
            errors.require("address", &self.address);
            errors.require("phone", &self.phone);
        }

        errors.into_result()
    }

    pub fn is_empty(&self) -> bool{
        self.name.is_none() && self.address.is_none() && self.phone.is_none()
    }
}
