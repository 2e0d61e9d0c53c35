//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for categories, content ids and quick actions
pub mod autocomplete;
