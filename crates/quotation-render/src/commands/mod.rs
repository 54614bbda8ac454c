//! Command implementations for the quotation renderer CLI
//!
//! Each command module handles the CLI interface and delegates to
//! quotation-template for the actual rendering.

pub mod render;
pub mod sample;
pub mod tokens;
