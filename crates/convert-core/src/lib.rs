//! Core types shared by every dcv crate: errors, options, the converter
//! trait, path resolution and the batch loop.

pub mod batch;
pub mod error;
pub mod options;
pub mod paths;
pub mod plugin;
