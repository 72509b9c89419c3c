//! Tests for element selection

extern crate std;

use crate::metadata::query::{find_dataset, find_dataset_mut, Selector};
use crate::metadata::tests::test_utils::template_document;

#[test]
fn test_select_all_variables() {
    let doc = template_document();
    let variables = Selector::tag("variable").select(&doc.root);
    std::assert_eq!(variables.len(), 3);
}

#[test]
fn test_select_within_dataset() {
    let doc = template_document();
    let variables = Selector::tag("variable").within(Some("ORG")).select(&doc.root);
    let names: Vec<&str> = variables.iter().filter_map(|v| v.attr("name")).collect();
    std::assert_eq!(names, vec!["PC2018_T001_001", "PC2018_T001_002"]);

    let tables = Selector::tag("table").within(Some("SE")).select(&doc.root);
    std::assert_eq!(tables.len(), 1);
    std::assert_eq!(tables[0].attr("name"), Some("T001"));

    std::assert!(Selector::tag("table").within(Some("XX")).select(&doc.root).is_empty());
}

#[test]
fn test_for_each_mut_respects_scope() {
    let mut doc = template_document();
    let mut touched = 0;
    Selector::tag("variable")
        .within(Some("SE"))
        .for_each_mut(&mut doc.root, &mut |v| {
            v.set_attr("label", "changed");
            touched += 1;
        });

    std::assert_eq!(touched, 1);
    let org = Selector::tag("variable").within(Some("ORG")).select(&doc.root);
    std::assert!(org.iter().all(|v| v.attr("label") != Some("changed")));
}

#[test]
fn test_find_dataset() {
    let mut doc = template_document();
    std::assert_eq!(
        find_dataset(&doc.root, "ORG").and_then(|d| d.attr("name")),
        Some("Original Tables")
    );
    std::assert!(find_dataset(&doc.root, "Geo").is_none());

    let se = find_dataset_mut(&mut doc.root, "SE").unwrap();
    se.set_attr("Visible", "false");
    std::assert_eq!(find_dataset(&doc.root, "SE").unwrap().attr("Visible"), Some("false"));
}
