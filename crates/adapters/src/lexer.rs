//! Grammar-free comment lexer for C-family sources.
//!
//! Recognises `//` line comments and `/* */` block comments, skipping the
//! string literals of the source language (see [`LiteralRules`]). Quoted
//! literals end at the closing quote or at the end of the line, whichever
//! comes first; triple-quoted literals may span lines. Unterminated block
//! comments are dropped.

use todo_gate_ports::{CommentTrivia, Language, ParsedSource, SourceParserPort};

/// Minimal C-style comment lexer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CStyleCommentLexer;

impl CStyleCommentLexer {
    /// Create a lexer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Collect comment trivia from `source` in document order.
    #[must_use]
    pub fn scan(&self, source: &str, language: Language) -> Vec<CommentTrivia> {
        Cursor::new(source.as_bytes(), LiteralRules::for_language(language)).run()
    }
}

impl SourceParserPort for CStyleCommentLexer {
    fn parse(&self, source: Box<str>, language: Language) -> ParsedSource {
        let trivia = self.scan(&source, language);
        tracing::trace!(%language, comments = trivia.len(), "lexed source");
        ParsedSource::new(source, language, trivia)
    }
}

/// Which literal forms hide comment markers in a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiteralRules {
    /// `"..."` strings.
    pub double_quote: bool,
    /// `'...'` strings or character literals.
    pub single_quote: bool,
    /// `"""..."""` multi-line strings.
    pub triple_quote: bool,
}

impl LiteralRules {
    /// Literal forms of `language`. Plain text has none, so apostrophes in
    /// prose never hide a comment.
    #[must_use]
    pub const fn for_language(language: Language) -> Self {
        let (double_quote, single_quote, triple_quote) = match language {
            Language::Text => (false, false, false),
            Language::Swift => (true, false, true),
            Language::Kotlin | Language::Scala => (true, true, true),
            Language::Php
            | Language::ObjectiveC
            | Language::CSharp
            | Language::C
            | Language::Cpp
            | Language::Go
            | Language::Java
            | Language::JavaScript
            | Language::TypeScript
            | Language::Tsx
            | Language::Rust => (true, true, false),
        };
        Self {
            double_quote,
            single_quote,
            triple_quote,
        }
    }
}

const TRIPLE_QUOTE: &[u8] = b"\"\"\"";

// All delimiters are ASCII, so byte offsets never split a UTF-8 sequence.
struct Cursor<'a> {
    bytes: &'a [u8],
    rules: LiteralRules,
    offset: usize,
    row: usize,
    line_start: usize,
    trivia: Vec<CommentTrivia>,
}

impl<'a> Cursor<'a> {
    const fn new(bytes: &'a [u8], rules: LiteralRules) -> Self {
        Self {
            bytes,
            rules,
            offset: 0,
            row: 0,
            line_start: 0,
            trivia: Vec::new(),
        }
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.offset + ahead).copied()
    }

    fn at_triple_quote(&self) -> bool {
        self.rules.triple_quote
            && self
                .bytes
                .get(self.offset..)
                .is_some_and(|rest| rest.starts_with(TRIPLE_QUOTE))
    }

    fn newline(&mut self) {
        self.row += 1;
        self.line_start = self.offset + 1;
    }

    fn run(mut self) -> Vec<CommentTrivia> {
        while let Some(byte) = self.peek(0) {
            match (byte, self.peek(1)) {
                (b'/', Some(b'/')) => self.line_comment(),
                (b'/', Some(b'*')) => self.block_comment(),
                (b'"', _) if self.at_triple_quote() => self.triple_quoted(),
                (b'"', _) if self.rules.double_quote => self.literal(byte),
                (b'\'', _) if self.rules.single_quote => self.literal(byte),
                (b'\n', _) => {
                    self.newline();
                    self.offset += 1;
                },
                _ => self.offset += 1,
            }
        }
        self.trivia
    }

    fn line_comment(&mut self) {
        let start = self.offset;
        while let Some(byte) = self.peek(0) {
            if byte == b'\n' {
                break;
            }
            self.offset += 1;
        }
        self.trivia.push(CommentTrivia::new(
            start..self.offset,
            self.row,
            start - self.line_start,
        ));
    }

    fn block_comment(&mut self) {
        let start = self.offset;
        let row = self.row;
        let column = start - self.line_start;
        self.offset += 2;

        while let Some(byte) = self.peek(0) {
            if byte == b'*' && self.peek(1) == Some(b'/') {
                self.offset += 2;
                self.trivia
                    .push(CommentTrivia::new(start..self.offset, row, column));
                return;
            }
            if byte == b'\n' {
                self.newline();
            }
            self.offset += 1;
        }
    }

    // Unterminated triple-quoted literals run to the end of the source.
    fn triple_quoted(&mut self) {
        self.offset += TRIPLE_QUOTE.len();
        while let Some(byte) = self.peek(0) {
            if self.at_triple_quote() {
                self.offset += TRIPLE_QUOTE.len();
                // `""""` closes with the last three quotes.
                while self.peek(0) == Some(b'"') {
                    self.offset += 1;
                }
                return;
            }
            if byte == b'\n' {
                self.newline();
            }
            self.offset += 1;
        }
    }

    fn literal(&mut self, quote: u8) {
        self.offset += 1;
        while let Some(byte) = self.peek(0) {
            match byte {
                b'\n' => return,
                b'\\' if self.peek(1) != Some(b'\n') => self.offset += 2,
                _ if byte == quote => {
                    self.offset += 1;
                    return;
                },
                _ => self.offset += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn lex(source: &str, language: Language) -> Result<Vec<(String, u32, u32)>, Box<dyn Error>> {
        let parsed = CStyleCommentLexer::new().parse(source.into(), language);
        let mut out = Vec::new();
        for trivia in parsed.trivia() {
            let position = parsed.position(trivia)?;
            out.push((
                parsed.text(trivia)?.to_owned(),
                position.line(),
                position.column(),
            ));
        }
        Ok(out)
    }

    fn texts(source: &str, language: Language) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(lex(source, language)?
            .into_iter()
            .map(|(text, _, _)| text)
            .collect())
    }

    #[test]
    fn line_and_block_comments_are_found() -> Result<(), Box<dyn Error>> {
        let source = "a // one\n  /* two\n three */ b\n// four";
        assert_eq!(
            lex(source, Language::Text)?,
            vec![
                ("// one".to_owned(), 0, 2),
                ("/* two\n three */".to_owned(), 1, 2),
                ("// four".to_owned(), 3, 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn literals_hide_comment_markers() -> Result<(), Box<dyn Error>> {
        let source = "s = \"// no\"; c = '/*'; t = \"esc \\\" // still no\" // yes\n";
        assert_eq!(texts(source, Language::Kotlin)?, vec!["// yes"]);
        Ok(())
    }

    #[test]
    fn unterminated_literal_stops_at_end_of_line() -> Result<(), Box<dyn Error>> {
        let source = "$s = 'don\n// TODO\n";
        assert_eq!(lex(source, Language::Php)?, vec![("// TODO".to_owned(), 1, 0)]);
        Ok(())
    }

    #[test]
    fn apostrophes_only_quote_where_the_language_has_char_literals() -> Result<(), Box<dyn Error>> {
        let source = "it's fine // TODO: x\n";
        for language in [Language::Text, Language::Swift] {
            assert_eq!(texts(source, language)?, vec!["// TODO: x"], "{language}");
        }
        assert!(texts(source, Language::Kotlin)?.is_empty());

        let quoted = "val c = 'x' // TODO: y\n";
        for language in [Language::Kotlin, Language::Scala, Language::Php] {
            assert_eq!(texts(quoted, language)?, vec!["// TODO: y"], "{language}");
        }
        Ok(())
    }

    #[test]
    fn plain_text_has_no_string_literals() -> Result<(), Box<dyn Error>> {
        let source = "He said \"stop // here\n// TODO\n";
        assert_eq!(texts(source, Language::Text)?, vec!["// here", "// TODO"]);
        Ok(())
    }

    #[test]
    fn triple_quoted_strings_span_lines() -> Result<(), Box<dyn Error>> {
        let source = "val s = \"\"\"\nhttp://x.y\n//TODO inside\n\"\"\" // after\n// next\n";
        for language in [Language::Kotlin, Language::Scala, Language::Swift] {
            assert_eq!(
                lex(source, language)?,
                vec![("// after".to_owned(), 3, 4), ("// next".to_owned(), 4, 0)],
                "{language}"
            );
        }
        Ok(())
    }

    #[test]
    fn extra_closing_quotes_belong_to_the_literal() -> Result<(), Box<dyn Error>> {
        let source = "val s = \"\"\"say \"hi\"\"\"\" // ok\n";
        assert_eq!(texts(source, Language::Kotlin)?, vec!["// ok"]);
        Ok(())
    }

    #[test]
    fn unterminated_triple_quote_hides_the_rest() -> Result<(), Box<dyn Error>> {
        assert!(texts("val s = \"\"\"\n// TODO\n", Language::Kotlin)?.is_empty());
        Ok(())
    }

    #[test]
    fn unterminated_block_comment_is_dropped() -> Result<(), Box<dyn Error>> {
        assert!(texts("x /* TODO never closed\n", Language::Text)?.is_empty());
        assert!(texts("/*/", Language::Text)?.is_empty());
        Ok(())
    }

    #[test]
    fn columns_count_characters() -> Result<(), Box<dyn Error>> {
        assert_eq!(lex("é // x", Language::Text)?, vec![("// x".to_owned(), 0, 2)]);
        Ok(())
    }
}
