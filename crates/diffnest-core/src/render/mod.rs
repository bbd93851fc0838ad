//! Renderers for diff results: a unified-diff-like view and RFC 6902 patches.

pub mod patch;
pub mod unified;
