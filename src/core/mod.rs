//! Core library modules for butterfly-view
//!
//! This module contains the internal implementation details of the butterfly-view library.

pub mod error;
pub mod model;
pub mod options;
pub mod parser;
pub mod render;
pub mod source;
