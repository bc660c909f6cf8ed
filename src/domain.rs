//! Domain models for component documentation.
//!
//! This module contains the descriptor schema read from each component
//! directory, and the configuration controlling which libraries are
//! documented.

/// Component descriptor schema.
pub mod descriptor;
pub use descriptor::{
    Descriptor, Direction, LinkRef, Links, PropertyDescriptor, PropertyError, PropertyKind,
};

mod config;
pub use config::Config;
