#![forbid(unsafe_code)]

//! Headless element tree standing in for the host document.
//!
//! - [`node`]: the node arena ([`Document`], [`Element`], [`NodeFlags`]).
//! - [`listener`]: listener registrations bound to a cancellation token.
//! - [`template`]: `const` structural descriptions instantiated into a document.
//! - [`markup`]: deterministic markup serialization for inspection.

pub mod listener;
pub mod markup;
pub mod node;
pub mod template;

pub use listener::ListenerSet;
pub use markup::to_markup;
pub use node::{Document, Element, NodeFlags, NodeId};
pub use template::{Template, TemplateNode};
