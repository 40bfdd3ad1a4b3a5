//! argscan — generic command-line argument scanning with response files.
//!
//! This crate is the argument-walking core of a compiler-driver-style
//! program: a stateful engine that scans a mutable argument vector,
//! recognizes long and short option spellings (including bundled short
//! flags like `-abc`), extracts typed values, and can splice the tokenized
//! contents of a response file into the argument stream mid-scan.
//!
//! It deliberately does *not* interpret option meaning, touch the
//! filesystem, spawn processes, or print anything. Hosts own the option
//! tables, the response-file convention (usually a leading `@`), the file
//! reads, and whatever happens to the scanned vector afterwards.
//!
//! | Module       | Responsibility |
//! |--------------|----------------|
//! | [`argvec`]   | [`ArgVec`] — the growable argument vector with atomic splice operations. |
//! | [`cursor`]   | [`Cursor`] and [`BundleState`] — scan position and short-option-bundle state. |
//! | [`matcher`]  | Pure matching primitives over (bundle state, token text). |
//! | [`value`]    | [`ArgValue`] — the closed set of typed value conversions, plus the tolerant numeric readers. |
//! | [`response`] | Response-file tokenization (two-pass, quote and comment aware). |
//! | [`scanner`]  | [`Scanner`] — the host-facing scan loop object. |
//! | [`error`]    | [`AllocError`] — the one failure mode (allocation). |
//!
//! The engine is single-threaded by design; entries are `Rc<str>` handles,
//! so anything handed to the host stays valid for as long as the host keeps
//! it, no matter how the vector is spliced afterwards.
//!
//! Logging goes through the `log` facade only; with no logger installed
//! the crate is completely silent.

pub mod argvec;
pub mod cursor;
pub mod error;
pub mod matcher;
pub mod response;
pub mod scanner;
pub mod value;

pub use argvec::ArgVec;
pub use cursor::{BundleState, Cursor, MAX_BUNDLE_DEPTH, OPTION_MARKER};
pub use error::AllocError;
pub use scanner::Scanner;
pub use value::ArgValue;

/// Conventional marker for response-file references (`@path`).
///
/// Detection is the host's job; the constant just names the convention.
pub const RESPONSE_MARKER: char = '@';
