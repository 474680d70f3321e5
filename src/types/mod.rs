//! Core types for Assisto.

pub mod message;

pub use message::*;
