//! End-to-end tests for parsing documents into handler callbacks.
//!
//! Uses fixture documents from `tests/fixtures`.

use std::error::Error as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use roxmltree::Document;

use xml_dispatch::xml::{emit_events, EventSink, NoAttributes};
use xml_dispatch::{
    CallbackRegistry, DispatchError, EventDispatcher, EventKind, Parser, ParserConfig, XmlHandler,
};

/// Path of a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Collects the events that occurred.
#[derive(Default)]
struct TestHandler {
    events: Vec<String>,
}

impl XmlHandler for TestHandler {
    fn register(registry: &mut CallbackRegistry<Self>) {
        registry
            .on_start(["root"], |handler| {
                handler.events.push("Start root".to_string());
                Ok(())
            })
            .on_end(["root"], |handler| {
                handler.events.push("End root".to_string());
                Ok(())
            })
            .on_start_with_attributes(["root", "element"], ["a", "c"], |handler, attrs| {
                handler.events.push("start element".to_string());
                handler.events.push(format!("a = {}", attrs.get(0).unwrap_or("null")));
                handler.events.push(format!("c = {}", attrs.get(1).unwrap_or("null")));
                Ok(())
            })
            .on_characters(["root", "element", "subElement"], |handler, chars| {
                handler.events.push(format!("Characters {chars}"));
                Ok(())
            });
    }
}

#[test]
fn test_do_nothing() {
    Parser::new()
        .parse_file::<TestHandler>(fixture_path("test_document.xml"), None)
        .unwrap();
}

#[test]
fn test_collect() {
    let mut handler = TestHandler::default();
    Parser::new()
        .parse_file(fixture_path("test_document.xml"), Some(&mut handler))
        .unwrap();

    assert_eq!(
        handler.events,
        vec![
            "Start root",
            "start element",
            "a = b",
            "c = 1",
            "Characters Hello",
            "End root",
        ]
    );
}

#[test]
fn test_collect_from_reader() {
    let xml = load_fixture("test_document.xml");
    let mut handler = TestHandler::default();
    Parser::new()
        .parse_reader(xml.as_bytes(), Some(&mut handler))
        .unwrap();
    assert_eq!(handler.events.len(), 6);
}

#[test]
fn test_missing_attribute_is_absent() {
    let xml = r#"<root><element c="2"/></root>"#;
    let mut handler = TestHandler::default();
    Parser::new().parse_str(xml, Some(&mut handler)).unwrap();

    assert_eq!(
        handler.events,
        vec!["Start root", "start element", "a = null", "c = 2", "End root"]
    );
}

#[test]
fn test_deeper_elements_do_not_match() {
    let xml = r#"<root><root><element a="x"/></root><other><element a="y"/></other></root>"#;
    let mut handler = TestHandler::default();
    Parser::new().parse_str(xml, Some(&mut handler)).unwrap();

    // Only the outer root fires; the nested root and both elements sit at
    // the wrong depth or under the wrong parent.
    assert_eq!(handler.events, vec!["Start root", "End root"]);
}

#[derive(Default)]
struct Catalog {
    books: Vec<String>,
    titles: Vec<String>,
    notes: Vec<String>,
    plain: Vec<String>,
    closed: usize,
}

const CAT: &str = "{urn:example:catalog}";

impl XmlHandler for Catalog {
    fn register(registry: &mut CallbackRegistry<Self>) {
        let book = [format!("{CAT}catalog"), format!("{CAT}book")];
        let title = [format!("{CAT}catalog"), format!("{CAT}book"), format!("{CAT}title")];
        let note = [format!("{CAT}catalog"), format!("{CAT}book"), format!("{CAT}note")];

        registry
            .on_start_with_attributes(
                book.clone(),
                ["id", "{urn:example:extra}rating"],
                |catalog, attrs| {
                    catalog.books.push(format!(
                        "{} rating={}",
                        attrs.value("id").unwrap_or("?"),
                        attrs.value("{urn:example:extra}rating").unwrap_or("none")
                    ));
                    Ok(())
                },
            )
            .on_end(book, |catalog| {
                catalog.closed += 1;
                Ok(())
            })
            .on_characters(title, |catalog, text| {
                catalog.titles.push(text.to_string());
                Ok(())
            })
            .on_characters(note, |catalog, text| {
                catalog.notes.push(text.to_string());
                Ok(())
            })
            .on_start_with_attributes(
                [format!("{CAT}catalog"), "book".to_string()],
                ["id"],
                |catalog, attrs| {
                    catalog.plain.extend(attrs.get(0).map(String::from));
                    Ok(())
                },
            );
    }
}

#[test]
fn test_namespaced_paths() {
    let mut catalog = Catalog::default();
    Parser::new()
        .parse_file(fixture_path("catalog.xml"), Some(&mut catalog))
        .unwrap();

    assert_eq!(catalog.books, vec!["b1 rating=5", "b2 rating=none"]);
    assert_eq!(catalog.titles, vec!["Dune", "Tom & Jerry"]);
    assert_eq!(catalog.notes, vec!["<not markup>"]);
    assert_eq!(catalog.plain, vec!["plain"]);
    assert_eq!(catalog.closed, 2);
}

#[derive(Default)]
struct Ratings(Vec<Option<String>>);

impl XmlHandler for Ratings {
    fn register(registry: &mut CallbackRegistry<Self>) {
        registry.on_start_with_attributes(["root"], ["rating"], |ratings, attrs| {
            ratings.0.push(attrs.get(0).map(String::from));
            Ok(())
        });
    }
}

#[test]
fn test_bare_attribute_ignores_namespaced() {
    let mut ratings = Ratings::default();
    let parser = Parser::new();
    parser
        .parse_str(r#"<root xmlns:x="urn:x" x:rating="5"/>"#, Some(&mut ratings))
        .unwrap();
    parser
        .parse_str(
            r#"<root xmlns:x="urn:x" x:rating="5" rating="1"/>"#,
            Some(&mut ratings),
        )
        .unwrap();

    assert_eq!(ratings.0, vec![None, Some("1".to_string())]);
}

#[test]
fn test_null_handler_over_fixtures() {
    let parser = Parser::new();
    for name in ["test_document.xml", "catalog.xml"] {
        parser
            .parse_file::<Catalog>(fixture_path(name), None)
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        parser.parse_discard(&load_fixture(name)).unwrap();
    }
}

#[test]
fn test_stack_empty_before_and_after() {
    for name in ["test_document.xml", "catalog.xml"] {
        let xml = load_fixture(name);
        let doc = Document::parse(&xml).unwrap();
        let registry = CallbackRegistry::<Catalog>::for_handler();
        let mut catalog = Catalog::default();
        let mut dispatcher = EventDispatcher::new(&registry, Some(&mut catalog));

        assert_eq!(dispatcher.depth(), 0);
        emit_events(&doc, &mut dispatcher).unwrap();
        assert_eq!(dispatcher.depth(), 0);
        dispatcher.finish().unwrap();
    }
}

#[test]
fn test_registry_reused_across_parses() {
    let registry = CallbackRegistry::<TestHandler>::for_handler();
    let parser = Parser::new();
    let xml = load_fixture("test_document.xml");

    let mut first = TestHandler::default();
    let mut second = TestHandler::default();
    parser.parse_str_with(&xml, &registry, Some(&mut first)).unwrap();
    parser.parse_str_with(&xml, &registry, Some(&mut second)).unwrap();

    assert_eq!(first.events, second.events);
    assert_eq!(first.events.len(), 6);
}

#[test]
fn test_malformed_nesting_keeps_stack() {
    let registry = CallbackRegistry::<TestHandler>::for_handler();
    let mut handler = TestHandler::default();
    let mut dispatcher = EventDispatcher::new(&registry, Some(&mut handler));

    dispatcher.start_element("", "root", &NoAttributes).unwrap();
    let err = dispatcher.end_element("", "element").unwrap_err();

    assert!(err.is_structural());
    assert_eq!(err.to_string(), "Unexpected end of element element. Expected root");
    assert_eq!(dispatcher.current_path(), ["root"]);
    drop(dispatcher);
    assert_eq!(handler.events, vec!["Start root"]);
}

#[derive(Default)]
struct Failing {
    calls: Vec<&'static str>,
}

#[derive(Debug)]
struct Rejected(String);

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rejected {}", self.0)
    }
}

impl std::error::Error for Rejected {}

impl XmlHandler for Failing {
    fn register(registry: &mut CallbackRegistry<Self>) {
        registry
            .on_characters(["root", "item"], |failing, text| {
                failing.calls.push("before");
                if text == "bad" {
                    return Err(Rejected(text.to_string()).into());
                }
                Ok(())
            })
            .on_characters(["root", "item"], |failing, _| {
                failing.calls.push("after");
                Ok(())
            })
            .on_end(["root"], |failing| {
                failing.calls.push("end");
                Ok(())
            });
    }
}

#[test]
fn test_callback_error_is_chained() {
    let xml = "<root><item>ok</item><item>bad</item><item>never</item></root>";
    let mut failing = Failing::default();
    let err = Parser::new().parse_str(xml, Some(&mut failing)).unwrap_err();

    match &err {
        DispatchError::Callback { kind, path, .. } => {
            assert_eq!(*kind, EventKind::Characters);
            assert_eq!(path, "root/item");
        }
        other => panic!("unexpected error: {other}"),
    }
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "rejected bad");
    assert!(source.downcast_ref::<Rejected>().is_some());

    // The failing event stops before the second binding and nothing after it runs
    assert_eq!(failing.calls, vec!["before", "after", "before"]);
}

#[test]
fn test_parse_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(load_fixture("test_document.xml").as_bytes())
        .unwrap();

    let mut handler = TestHandler::default();
    Parser::new()
        .parse_file(file.path(), Some(&mut handler))
        .unwrap();
    assert_eq!(handler.events.first().map(String::as_str), Some("Start root"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Parser::new()
        .parse_file::<TestHandler>(dir.path().join("missing.xml"), None)
        .unwrap_err();
    assert!(matches!(err, DispatchError::Io(_)));
}

#[test]
fn test_malformed_document_is_xml_error() {
    let err = Parser::new()
        .parse_str::<TestHandler>("<root><element></root>", None)
        .unwrap_err();
    assert!(matches!(err, DispatchError::XmlParse(_)));
    assert!(!err.is_structural());
}

#[test]
fn test_strict_config() {
    let parser = Parser::with_config(ParserConfig::default().with_allow_dtd(false)).unwrap();
    let xml = "<!DOCTYPE root><root/>";
    assert!(matches!(
        parser.parse_discard(xml),
        Err(DispatchError::XmlParse(_))
    ));
}
