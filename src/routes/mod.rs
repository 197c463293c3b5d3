mod authentication;
mod customer;
mod dashboard;
mod health_check;
mod order;
mod payment;
mod product;
mod product_supplier;
mod supplier;
mod users;

pub use authentication::*;
pub use customer::*;
pub use dashboard::*;
pub use health_check::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use product_supplier::*;
pub use supplier::*;
pub use users::*;
