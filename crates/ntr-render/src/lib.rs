//! HTML rendering for the NTR analyzer
//!
//! A pure mapping from an analysis outcome to a presentational HTML
//! fragment. Rendering is deterministic: the same input produces
//! byte-identical output, and the host overwrites its single output region
//! wholesale with whatever this crate returns.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod html;
pub mod linkify;

pub use html::{render, status_icon};
pub use linkify::linkify;
