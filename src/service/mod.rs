pub mod auth;
pub mod messaging;

pub use auth::ServiceClientAuth;
pub use messaging::MessagingClient;
