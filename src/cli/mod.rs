//! CLI-specific utilities for butterfly-view
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod menu;
pub mod overwrite;

pub use menu::prompt_selection;
pub use overwrite::confirm_overwrite;
