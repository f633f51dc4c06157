//! An abstraction layer for different LLM providers with remote tools.
//!
//! This crate establishes an unified contract for sending user queries
//! to various supported LLM providers while exposing tools discovered
//! from a remote tool server, so that callers can seamlessly switch
//! between providers without modifying their own code.
//!
//! Types in this crate don't perform any I/O, instead they are the
//! constraints that the implementors should adhere to. The concrete
//! provider clients and the tool bridge live in their own crates.

#![deny(missing_docs)]

mod bridge;
mod client;
mod content;
mod error;
mod tool;

pub use bridge::*;
pub use client::*;
pub use content::*;
pub use error::*;
pub use tool::*;
