//! # todo-gate-adapters
//!
//! Adapter implementations for ports (comment parsing, input resolution,
//! source reading). This crate depends on `ports` and `shared`.

pub mod comments;
pub mod lexer;
pub mod reader;
pub mod resolver;

pub use comments::TreeSitterCommentParser;
pub use lexer::{CStyleCommentLexer, LiteralRules};
pub use reader::LocalSourceReader;
pub use resolver::GlobFileResolver;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
