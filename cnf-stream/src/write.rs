//! Utilities for emitting data using a [`DeferredWriter`][crate::DeferredWriter].
pub mod text;
