// tsw-api: Async Rust client for the Crestron touch panel device API

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use auth::Credentials;
pub use client::PanelClient;
pub use endpoint::ResponseShape;
pub use error::Error;
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};
