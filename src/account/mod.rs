pub mod account_info;

pub use account_info::AccountInfo;
