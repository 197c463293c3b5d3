mod delete;
mod get;
mod post;

pub use delete::*;
pub use get::*;
pub use post::*;
