//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Integer pixel geometry and colour types
//! - Logging utilities

pub mod math;
pub mod logging;
