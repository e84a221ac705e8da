// Library exports for hosts, tests, and the CLI
//
// # Threading model
//
// The controller is single-threaded and driven by host callbacks. Host
// notifications are delivered through `Host::drain_events` and handled
// synchronously; the only deferred work is the focus timer, which the host
// fires later on the same thread. Shared controller state lives in
// `session::Session` and is never locked. The one mutex in the crate guards
// the debug log file.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod close;
pub mod commands;
pub mod controller;
pub mod debug;
pub mod error;
pub mod file_ops;
pub mod focus;
pub mod host;
pub mod intercept;
pub mod menu;
pub mod registry;
pub mod session;
pub mod sort;
pub mod sticky;
pub mod support;
pub mod tab;

pub use close::{CloseRequest, CloseType};
pub use commands::SessionCommand;
pub use controller::TabSessionController;
pub use error::SessionError;
pub use tabs_extra_config as config;
