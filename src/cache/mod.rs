pub mod token;
pub mod token_cache;

pub use token::SignedToken;
pub use token_cache::TokenCache;
