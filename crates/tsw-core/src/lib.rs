//! Polling monitor and control adapter for Crestron touch panels.
//!
//! Sits between `tsw-api` and hosts (the `tsw` CLI, or any embedding
//! monitoring service):
//!
//! - **[`Adapter`]**: owns one panel's session and last-known state.
//!   [`poll()`](Adapter::poll) authenticates, fetches every enabled
//!   property group and publishes a [`Report`];
//!   [`apply_command()`](Adapter::apply_command) turns a `Group#Property`
//!   control command into a partial display update.
//!
//! - **[`GroupSelection`]**: which property groups are fetched and reported.
//!
//! - **[`FetchState`]**: per-cycle record of attempted endpoints and their
//!   failures, distinguishing partial degradation from total failure.
//!
//! - **Projection** ([`projector`]): flattens the device snapshot into the
//!   `Group#Property → String` statistics map and the controllable property
//!   list.

pub mod adapter;
pub mod command;
pub mod config;
pub mod error;
pub mod fetch_state;
pub mod format;
pub mod groups;
pub mod projector;
pub mod properties;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::{Adapter, Report};
pub use command::{Command, ControlValue};
pub use config::{AdapterConfig, DEFAULT_INTERVAL, Scheme, TlsVerification};
pub use error::CoreError;
pub use fetch_state::FetchState;
pub use format::NOT_AVAILABLE;
pub use groups::{ALL_GROUPS, GroupSelection, PropertyGroup};
pub use projector::{ControlKind, ControllableProperty, DeviceSnapshot, Statistics};
