pub mod customer;
pub mod money;
pub mod order;
pub mod pagination;
pub mod payment;
pub mod payment_mode;
pub mod product;
pub mod product_supplier;
pub mod supplier;

pub use customer::CustomerForm;
pub use order::{OrderItemRequest, OrderRequest};
pub use pagination::ListQuery;
pub use payment::PaymentForm;
pub use product::ProductForm;
pub use product_supplier::ProductSupplierForm;
pub use supplier::SupplierForm;

// Which fields a write has to carry: create and full update need every
// required field, partial update takes any subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode{
    Create,
    Replace,
    Patch
}

impl WriteMode {
    pub fn requires_all(&self) -> bool{
        !matches!(self, WriteMode::Patch)
    }
}

// Surrounding whitespace is dropped before text fields are validated and stored
pub(crate) fn trim_text(value: &mut Option<String>){
    if let Some(text) = value {
        let trimmed = text.trim();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
}
