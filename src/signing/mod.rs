pub mod sas;

pub use sas::{HmacSasSigner, SasSigner};
