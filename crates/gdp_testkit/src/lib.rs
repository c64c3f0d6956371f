//! # GDP Testkit
//!
//! Test utilities for the GDP decoder crates.
//!
//! This crate provides:
//! - A packet builder that encodes GDP headers and payloads
//! - Fixtures for realistic event payloads and sample streams
//! - Property-based test generators using proptest
//! - Known-answer test vectors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gdp_testkit::prelude::*;
//!
//! let bytes = concat_packets([
//!     PacketBuilder::caps("audio/x-raw, rate=(int)44100").build(),
//!     PacketBuilder::buffer(vec![0u8; 16]).timestamp(0).build(),
//!     eos_event().build(),
//! ]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod packet;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::packet::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use packet::*;
pub use vectors::*;
