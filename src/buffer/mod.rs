// src/buffer/mod.rs
//! Growable byte buffer managed by the pools

pub mod core;
pub(crate) mod ops;

pub use self::core::{BUF_MAX_SIZE, Buffer};
