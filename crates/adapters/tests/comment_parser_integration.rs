//! Integration tests for comment collection feeding the classifier.

use std::path::PathBuf;
use todo_gate_adapters::TreeSitterCommentParser;
use todo_gate_domain::{Record, RulePatterns, RuleSet, Status, classify};
use todo_gate_ports::{Language, SourceParserPort};
use todo_gate_shared::{ErrorEnvelope, Result};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../testkit/fixtures/sources/SomeClass.cs")
}

fn rules() -> Result<RuleSet> {
    let patterns = RulePatterns {
        prefixes: vec!["^TODO".to_owned(), "^BUG".to_owned()],
        disallowed_prefixes: vec!["^DONT-CHECK-IN".to_owned()],
        suffixes: vec![r"^ \([^)]+, [0-9]{4}-[0-9]{2}-[0-9]{2}\): .".to_owned()],
    };
    RuleSet::compile(&patterns, false).map_err(ErrorEnvelope::from)
}

fn records(source: &str, language: Language) -> Result<Vec<Record>> {
    let rules = rules()?;
    let parsed = TreeSitterCommentParser::new().parse(source.into(), language);
    let mut out = Vec::new();
    for trivia in parsed.trivia() {
        let text = parsed.text(trivia)?;
        if let Some(classification) = classify(text, &rules).map_err(ErrorEnvelope::from)? {
            out.push(Record::from_classification(
                classification,
                parsed.position(trivia)?,
            ));
        }
    }
    Ok(out)
}

#[test]
fn csharp_fixture_yields_records_in_order() -> Result<()> {
    let code = std::fs::read_to_string(fixture_path()).map_err(ErrorEnvelope::from)?;
    let found = records(&code, Language::CSharp)?;

    let expected = vec![
        Record::try_new("TODO".into(), String::new(), 3, 4, Status::NonMatchingSuffix),
        Record::try_new(
            "TODO".into(),
            ": invalid".into(),
            6,
            8,
            Status::NonMatchingSuffix,
        ),
        Record::try_new(
            "TODO".into(),
            " (mristin, 2007-07-20): Do something".into(),
            8,
            8,
            Status::Ok,
        ),
    ]
    .into_iter()
    .collect::<std::result::Result<Vec<_>, _>>()
    .map_err(ErrorEnvelope::from)?;

    assert_eq!(found, expected);
    Ok(())
}

#[test]
fn empty_source_has_no_records() -> Result<()> {
    assert!(records("", Language::CSharp)?.is_empty());
    Ok(())
}

#[test]
fn prose_is_not_code() -> Result<()> {
    let text = "This is no C# code, but it has a 'TODO (mristin, 2020-07-20): Do something'.";
    assert!(records(text, Language::CSharp)?.is_empty());
    Ok(())
}

#[test]
fn every_grammar_reports_line_comments() -> Result<()> {
    let cases = [
        (Language::C, "int x; // TODO\n"),
        (Language::Cpp, "int x; // TODO\n"),
        (Language::Go, "package main // TODO\n"),
        (Language::Java, "class A {} // TODO\n"),
        (Language::JavaScript, "let x; // TODO\n"),
        (Language::TypeScript, "let x: number; // TODO\n"),
        (Language::Tsx, "const a = <div />; // TODO\n"),
        (Language::Rust, "fn a() {} // TODO\n"),
        (Language::Swift, "let x = 1 // TODO\n"),
    ];
    for (language, source) in cases {
        let found = records(source, language)?;
        assert_eq!(found.len(), 1, "language: {language}");
        assert!(
            found.iter().all(|record| record.status() == Status::NonMatchingSuffix),
            "language: {language}"
        );
    }
    Ok(())
}

#[test]
fn unclosed_block_comments_never_reach_the_classifier() -> Result<()> {
    let cases = [
        (Language::C, "int x;\n/* TODO never closed\n"),
        (Language::Cpp, "int x;\n/* TODO never closed\n"),
        (Language::CSharp, "class A {}\n/* TODO never closed\n"),
        (Language::Go, "package main\n/* TODO never closed\n"),
        (Language::Java, "class A {}\n/* TODO never closed\n"),
        (Language::JavaScript, "let x;\n/* TODO never closed\n"),
        (Language::TypeScript, "let x: number;\n/* TODO never closed\n"),
        (Language::Tsx, "const a = <div />;\n/* TODO never closed\n"),
        (Language::Rust, "fn a() {}\n/* TODO never closed\n"),
        (Language::Kotlin, "fun a() {}\n/* TODO never closed\n"),
    ];
    for (language, source) in cases {
        let found = records(source, language)?;
        assert!(found.is_empty(), "language: {language}, found: {found:?}");
    }
    Ok(())
}
