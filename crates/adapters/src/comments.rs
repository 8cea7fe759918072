//! Tree-sitter comment parser adapter.

use crate::lexer::CStyleCommentLexer;
use todo_gate_ports::{CommentTrivia, Language, ParsedSource, SourceParserPort};
use tree_sitter::{Node, Parser, Tree};

const COMMENT_KINDS: [&str; 3] = ["comment", "line_comment", "block_comment"];
const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";

/// Tree-sitter based comment parser with a C-style lexer fallback for
/// languages without a bundled grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterCommentParser {
    fallback: CStyleCommentLexer,
}

impl TreeSitterCommentParser {
    /// Create a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback: CStyleCommentLexer::new(),
        }
    }

    /// Returns true when `language` is parsed with a tree-sitter grammar.
    #[must_use]
    pub fn has_grammar(language: Language) -> bool {
        tree_sitter_language(language).is_some()
    }
}

impl SourceParserPort for TreeSitterCommentParser {
    fn parse(&self, source: Box<str>, language: Language) -> ParsedSource {
        let Some(ts_language) = tree_sitter_language(language) else {
            return self.fallback.parse(source, language);
        };

        match parse_tree(&source, &ts_language) {
            Some(tree) => {
                let trivia = collect_comment_trivia(&tree, &source);
                tracing::trace!(%language, comments = trivia.len(), "parsed source");
                ParsedSource::new(source, language, trivia)
            },
            None => {
                tracing::debug!(%language, "tree-sitter produced no tree");
                ParsedSource::empty(source, language)
            },
        }
    }
}

fn parse_tree(code: &str, ts_language: &tree_sitter::Language) -> Option<Tree> {
    let mut parser = Parser::new();
    if parser.set_language(ts_language).is_err() {
        return None;
    }
    parser.parse(code, None)
}

fn tree_sitter_language(language: Language) -> Option<tree_sitter::Language> {
    match language {
        Language::CSharp => Some(tree_sitter_c_sharp::LANGUAGE.into()),
        Language::C => Some(tree_sitter_c::LANGUAGE.into()),
        Language::Cpp => Some(tree_sitter_cpp::LANGUAGE.into()),
        Language::Go => Some(tree_sitter_go::LANGUAGE.into()),
        Language::Java => Some(tree_sitter_java::LANGUAGE.into()),
        Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
        Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        Language::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
        Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
        Language::Php
        | Language::Swift
        | Language::Kotlin
        | Language::Scala
        | Language::ObjectiveC
        | Language::Text => None,
    }
}

// Pre-order walk; comment nodes are leaves for our purposes, so their
// children (e.g. doc markers) are skipped.
fn collect_comment_trivia(tree: &Tree, source: &str) -> Vec<CommentTrivia> {
    let mut trivia = Vec::new();
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        let is_comment = COMMENT_KINDS.contains(&node.kind());
        if is_comment {
            if is_well_formed(node, source) {
                trivia.push(trivia_from_node(node));
            } else {
                tracing::debug!(row = node.start_position().row, "dropped unterminated comment");
            }
        }

        if !is_comment && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return trivia;
            }
        }
    }
}

// Some grammars (tree-sitter-rust) close a `/*` left open at EOF with the
// file end; such nodes are dropped like the lexer drops them.
fn is_well_formed(node: Node<'_>, source: &str) -> bool {
    if node.has_error() || node.is_missing() {
        return false;
    }
    source
        .get(node.start_byte()..node.end_byte())
        .is_some_and(|text| {
            text.trim_end()
                .strip_prefix(BLOCK_COMMENT_OPEN)
                .is_none_or(|rest| rest.ends_with(BLOCK_COMMENT_CLOSE))
        })
}

fn trivia_from_node(node: Node<'_>) -> CommentTrivia {
    let start = node.start_position();
    CommentTrivia::new(node.start_byte()..node.end_byte(), start.row, start.column)
}
