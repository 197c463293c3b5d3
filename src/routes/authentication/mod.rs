mod login;
mod refresh;

pub use login::*;
pub use refresh::*;
