pub mod extractors;
pub mod jwt;

pub use extractors::AuthenticatedUser;
pub use jwt::{Claims, TokenPair, TokenType, Tokenizer};
