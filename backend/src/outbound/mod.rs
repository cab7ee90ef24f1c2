//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for development and tests
//! - **qr**: QR decoding of photos and SVG rendering of codes
//!
//! Adapters translate between domain types and infrastructure shapes. They
//! contain no business rules.

pub mod memory;
pub mod persistence;
pub mod qr;
