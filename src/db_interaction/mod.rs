mod customers;
mod dashboard;
mod orders;
mod payments;
mod product_suppliers;
mod products;
mod suppliers;
mod user;

pub use customers::*;
pub use dashboard::*;
pub use orders::*;
pub use payments::*;
pub use product_suppliers::*;
pub use products::*;
pub use suppliers::*;
pub use user::*;

use crate::error::FieldErrors;

pub(crate) fn invalid_pk(field: &str, id: i32) -> FieldErrors{
    FieldErrors::single(field, format!("Invalid pk \"{}\" - object does not exist.", id))
}
