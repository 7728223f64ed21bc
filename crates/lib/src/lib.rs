//! Core of the `taw://` protocol handler.
//!
//! A browser hands the launcher `taw://<session>:<id>:<uid>:<composition>`.
//! This crate decodes that URL, works out which player to start and from
//! where, folds the session into the composition as a
//! `#web_auth_token=` fragment, and runs the player.

pub mod codec;
pub mod composition;
pub mod error;
pub mod invocation;
pub mod launch;
pub mod paths;
pub mod url;

pub use error::LaunchError;
pub use invocation::Invocation;
pub use launch::{Launch, launcher_for};
pub use paths::ResolvedPaths;
pub use url::{SessionDescriptor, TawUrl};
