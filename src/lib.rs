//! `Hangar` - local-first wardrobe core
//!
//! This crate stores clothing items, outfits and settings in an embedded
//! store, asks a user-selected model provider for outfit suggestions and photo
//! analysis, produces virtual try-on previews, and exports a PDF catalog. The
//! presentation layer sits on top and talks to it through [`context::AppContext`].

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Configuration: store location, config file, logging
pub mod config;
/// Application context shared by the UI
pub mod context;
/// Data access layer - item, outfit and settings operations
pub mod core;
/// Camera and file-sink collaborators
pub mod device;
/// SeaORM entity definitions for the local store
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// PDF catalog export
pub mod export;
/// Data URL and image helpers
pub mod media;
/// Record shapes handed to the presentation layer
pub mod models;
/// Model provider adapters
pub mod providers;
/// Theme seed handling and hex to HSL conversion
pub mod theme;
/// Virtual try-on
pub mod tryon;

#[cfg(test)]
pub mod test_utils;
