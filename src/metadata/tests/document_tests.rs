//! Tests for the metadata document tree

extern crate std;

use crate::metadata::document::{Document, Element, Node};
use crate::metadata::tests::test_utils::{template_document, TEMPLATE_XML};

#[test]
fn test_parse_keeps_structure_and_attribute_order() {
    let doc = template_document();
    std::assert!(doc.declaration);
    std::assert_eq!(doc.root.name, "survey");

    let names: Vec<&str> = doc.root.attributes.iter().map(|a| a.name.as_str()).collect();
    std::assert_eq!(names, vec!["GUID", "name", "DisplayName", "year", "Visible"]);
    std::assert_eq!(doc.root.attr("year"), Some("2018"));
}

#[test]
fn test_parse_preserves_cdata() {
    let doc = template_document();
    let description = doc.root.child("Description").unwrap();
    std::assert_eq!(description.children, vec![Node::CData("Population register".to_string())]);
}

#[test]
fn test_roundtrip_is_stable() {
    let doc = template_document();
    let first = doc.to_xml_string().unwrap();
    let reparsed = Document::parse_str(&first).unwrap();
    std::assert_eq!(reparsed, doc);
    std::assert_eq!(reparsed.to_xml_string().unwrap(), first);
}

#[test]
fn test_non_ascii_attribute_survives_roundtrip() {
    let doc = Document::parse_str(TEMPLATE_XML).unwrap();
    let xml = doc.to_xml_string().unwrap();
    std::assert!(xml.contains("PoblaciónTotal"));
}

#[test]
fn test_escaping_on_write() {
    let mut root = Element::new("survey");
    root.set_attr("notes", "a < b & \"c\"");
    let xml = Document::new(root).to_xml_string().unwrap();
    let reparsed = Document::parse_str(&xml).unwrap();
    std::assert_eq!(reparsed.root.attr("notes"), Some("a < b & \"c\""));
}

#[test]
fn test_comments_are_kept() {
    let doc = Document::parse_str("<tables><!-- Insert SE tables here !!! --></tables>").unwrap();
    std::assert!(!doc.declaration);
    std::assert_eq!(doc.root.children, vec![Node::Comment(" Insert SE tables here !!! ".to_string())]);
    std::assert!(doc.to_xml_string().unwrap().contains("<!-- Insert SE tables here !!! -->"));
}

#[test]
fn test_set_attr_replaces_in_place() {
    let mut element = Element::new("variable");
    element.set_attr("name", "T001_001");
    element.set_attr("label", "old");
    element.set_attr("name", "T001_002");

    std::assert_eq!(element.attributes.len(), 2);
    std::assert_eq!(element.attributes[0].value, "T001_002");
    std::assert!(element.require_attr("missing").is_err());
}

#[test]
fn test_malformed_documents_are_rejected() {
    std::assert!(Document::parse_str("<survey><table></survey>").is_err());
    std::assert!(Document::parse_str("<survey>").is_err());
    std::assert!(Document::parse_str("").is_err());
    std::assert!(Document::parse_str("<a/><b/>").is_err());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("PC2018.xml");

    let doc = template_document();
    doc.save(&path).unwrap();
    let loaded = Document::load(&path).unwrap();
    std::assert_eq!(loaded, doc);
}

#[test]
fn test_multiline_attribute_values_survive_save() {
    let doc = Document::parse_str(
        r#"<survey><table name="T1" notes="line one&#10;line two&#13;&#9;end"/></survey>"#,
    ).unwrap();
    let table = doc.root.child("table").unwrap();
    std::assert_eq!(table.attr("notes"), Some("line one\nline two\r\tend"));

    let xml = doc.to_xml_string().unwrap();
    std::assert!(xml.contains(r#"notes="line one&#10;line two&#13;&#9;end""#));

    let reloaded = Document::parse_str(&xml).unwrap();
    std::assert_eq!(reloaded, doc);
}
