//! # diffnest-core
//!
//! Structural diffs between JSON and YAML documents.
//!
//! Documents are decoded into a format-agnostic [`Value`] tree and compared
//! node by node. Arrays are reconciled either by position or by best content
//! match, multiline strings are compared line by line, and multi-document
//! streams (YAML `---` streams, JSON Lines) are paired by an exact
//! minimum-cost assignment before diffing.
//!
//! ## Quick start
//!
//! ```rust
//! use diffnest_core::{has_differences, match_documents, parse_documents};
//! use diffnest_core::{render_unified, ContextMode, DiffOptions, Format};
//!
//! let a = parse_documents("name: web\nreplicas: 2\n", Format::Yaml).unwrap();
//! let b = parse_documents(r#"{"name":"web","replicas":3}"#, Format::Json).unwrap();
//!
//! let results = match_documents(&a, &b, DiffOptions::default());
//! assert!(has_differences(&results));
//! assert_eq!(
//!     render_unified(&results, ContextMode::DiffOnly),
//!     "- replicas: 2\n+ replicas: 3\n"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tree and numeric equality
//! - [`compare`]: node comparator (objects, scalars, dispatch)
//! - [`matcher`]: multi-document pairing with mismatch penalties
//! - [`assignment`]: Hungarian-method assignment solver
//! - [`context`]: context windowing for rendering
//! - [`parse`]: JSON / YAML document stream decoding
//! - [`render`]: unified and JSON-patch output
//! - [`error`]: error types

mod array;
pub mod assignment;
pub mod compare;
pub mod context;
pub mod diff;
pub mod error;
pub mod matcher;
mod multiline;
pub mod parse;
pub mod render;
pub mod value;

pub use compare::Comparator;
pub use context::{window, ContextMode, Visible};
pub use diff::{has_differences, ArrayStrategy, DiffNode, DiffOptions, Status};
pub use error::{DiffnestError, Result};
pub use matcher::match_documents;
pub use parse::{detect_format, parse_documents, Format};
pub use render::patch::{patch_operations, render_patch, PatchOp};
pub use render::unified::render_unified;
pub use value::{Number, Value};

/// Decode two document sources and pair-diff them.
///
/// The results are detached from the decoded input; use
/// [`parse_documents`] with [`match_documents`] to borrow instead.
///
/// # Errors
///
/// Returns an error if either source fails to decode.
pub fn diff_documents(
    text_a: &str,
    format_a: Format,
    text_b: &str,
    format_b: Format,
    options: DiffOptions,
) -> Result<Vec<DiffNode<'static>>> {
    let docs_a = parse_documents(text_a, format_a)?;
    let docs_b = parse_documents(text_b, format_b)?;
    Ok(match_documents(&docs_a, &docs_b, options)
        .into_iter()
        .map(DiffNode::into_owned)
        .collect())
}
