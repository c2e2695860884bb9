//! Common utilities for the sift selector compiler.
//!
//! This crate provides shared infrastructure used by the compiler and its tools:
//! - **Warning System** - deduplicated, colored terminal notices for legacy syntax

pub mod warning;
