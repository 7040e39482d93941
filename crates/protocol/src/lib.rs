//! Wire types for the Droptune shell.
//!
//! This crate contains the serde-serializable types exchanged between the
//! native shell, the rendering engine that proposes visits, and the page
//! content that posts script messages. These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * Closed: Unknown message names fail to deserialize instead of falling through
//! * Stable: Changes only when the engine or page contract changes
//!
//! Coordination logic lives in `droptune-shell`.

pub mod inbound;
pub mod script;
pub mod visit;

pub use inbound::*;
pub use script::*;
pub use visit::*;
