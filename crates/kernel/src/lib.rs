//! Atelier Admin Shell Kernel Library
//!
//! The extension registry behind the admin application shell: menu links,
//! settings sections, component and field libraries, plugins, injection
//! zones, hooks, translations and the state store. The `atelier` binary
//! wraps it with the `inspect` and `upgrade` commands.

pub mod builtin;
pub mod config;
pub mod customization;
pub mod error;
pub mod extension;
pub mod hook;
pub mod injection;
pub mod library;
pub mod locale;
pub mod models;
pub mod registry;
pub mod render;
pub mod store;
pub mod upgrade;

pub use error::{RegistryError, RegistryResult};
pub use extension::{CustomBootstrap, Extension, PluginBootstrap};
pub use registry::{AdminApp, SealedAdmin};
