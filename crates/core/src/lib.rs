//! Droptune shell core.
//!
//! A native navigation container that delegates page rendering to a remote
//! web server. This crate holds the coordination logic: every proposed visit
//! is classified as an in-app page, an authentication handshake or an
//! external link, and every visit failure is turned into an inline error on
//! the one slot it concerns.
//!
//! The rendering engine, the view hierarchy and the auth web view are
//! collaborators behind [`Renderer`], [`Presenter`] and [`PageLoader`].
//! [`Shell`] serializes all inbound calls onto one event loop.

pub mod auth;
pub mod bridge;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fake;
pub mod presenter;
pub mod session;
pub mod shell;
pub mod slot;

pub use auth::{AuthDelegate, AuthFlow, AuthFlowState, FlowId, NavigationPolicy};
pub use bridge::ScriptEvent;
pub use catalog::{ErrorCatalog, ErrorContent};
pub use config::{ProcessPool, ShellConfig, WebViewConfiguration};
pub use coordinator::{HostParts, NavigationCoordinator, VisitClass};
pub use droptune_protocol::{ErrorCode, InboundMessage, ScriptMessageName, VisitAction, VisitFailure};
pub use error::{Result, ShellError};
pub use presenter::{Alert, PageLoader, Presenter};
pub use session::{Renderer, Session};
pub use shell::{PolicyReply, Shell, ShellEvent, ShellHandle};
pub use slot::{NavigationStack, RenderState, SlotId, VisitableSlot};
