//! Tests for template → target synchronization

extern crate std;

use crate::metadata::document::Document;
use crate::metadata::query::Selector;
use crate::metadata::tests::test_utils::{target_document, template_document};
use crate::sync::key::KeyRule;
use crate::sync::patch::{patch_attributes, PatchOutcome};
use crate::sync::scope::{ElementKind, SyncScope};
use crate::sync::survey::{survey_year, sync_display_name};
use crate::sync::synchronizer::{SyncPlan, Synchronizer};

fn variable<'a>(doc: &'a Document, name: &str) -> &'a crate::metadata::Element {
    Selector::tag("variable")
        .select(&doc.root)
        .into_iter()
        .find(|v| v.attr("name") == Some(name))
        .unwrap()
}

#[test]
fn test_label_is_copied_by_exact_name() {
    let source = Document::parse_str(
        r#"<survey><variable name="T001_001" label="PoblaciónTotal"/></survey>"#,
    ).unwrap();
    let mut target = Document::parse_str(
        r#"<survey><variable name="T001_001" label="PoblacionTotal"/></survey>"#,
    ).unwrap();

    let scope = SyncScope::custom(ElementKind::Variable, "label").unwrap();
    let report = Synchronizer::new(&source, scope, KeyRule::Exact).apply(&mut target);

    std::assert_eq!(report.updated, 1);
    std::assert_eq!(variable(&target, "T001_001").attr("label"), Some("PoblaciónTotal"));
}

#[test]
fn test_matching_nodes_receive_template_values() {
    let template = template_document();
    let mut target = target_document();

    let scope = SyncScope::custom(ElementKind::Variable, "label,indent,formatting")
        .unwrap()
        .within(Some("ORG"));
    let report = Synchronizer::new(&template, scope, KeyRule::Trailing(8)).apply(&mut target);

    std::assert_eq!(report.examined, 3);
    std::assert_eq!(report.updated, 2);
    std::assert_eq!(report.unmatched, 1);

    let first = variable(&target, "PC2019_T001_001");
    std::assert_eq!(first.attr("label"), Some("PoblaciónTotal"));
    std::assert_eq!(first.attr("indent"), Some("0"));
    std::assert_eq!(first.attr("formatting"), Some("9"));
    // attributes outside the scope are untouched
    std::assert_eq!(first.attr("qLabel"), Some(""));

    std::assert_eq!(variable(&target, "PC2019_T001_002").attr("label"), Some("Hombres"));
}

#[test]
fn test_target_only_nodes_are_unchanged() {
    let template = template_document();
    let mut target = target_document();
    let before = variable(&target, "PC2019_T001_009").clone();

    let scope = SyncScope::preset("variable-full").unwrap();
    Synchronizer::new(&template, scope, KeyRule::Trailing(3)).apply(&mut target);

    std::assert_eq!(variable(&target, "PC2019_T001_009"), &before);
}

#[test]
fn test_nodes_missing_a_scoped_attribute_are_skipped() {
    let template = template_document();
    let mut target = target_document();

    let scope = SyncScope::custom(ElementKind::Variable, "label,PN")
        .unwrap()
        .within(Some("ORG"));
    let report = Synchronizer::new(&template, scope, KeyRule::Trailing(3)).apply(&mut target);

    std::assert_eq!(report.skipped_missing_attribute, 1);
    std::assert_eq!(report.updated, 1);
    let second = variable(&target, "PC2019_T001_002");
    std::assert_eq!(second.attr("label"), Some("Varones"));
    std::assert!(!second.has_attr("PN"));
    std::assert_eq!(variable(&target, "PC2019_T001_001").attr("PN"), Some("blues"));
}

#[test]
fn test_ambiguous_keys_leave_targets_alone() {
    let template = template_document();
    let mut target = target_document();

    // "001" exists in both the SE and ORG datasets of the template
    let scope = SyncScope::custom(ElementKind::Variable, "label").unwrap();
    let synchronizer = Synchronizer::new(&template, scope, KeyRule::Trailing(3));
    std::assert_eq!(synchronizer.index().len(), 1);

    let report = synchronizer.apply(&mut target);
    std::assert_eq!(report.examined, 4);
    std::assert_eq!(report.ambiguous, 2);
    std::assert_eq!(report.updated, 1);
    std::assert_eq!(report.unmatched, 1);
    std::assert_eq!(variable(&target, "PC2019_T001_001").attr("label"), Some("PoblacionTotal"));
}

#[test]
fn test_second_run_changes_nothing() {
    let template = template_document();
    let mut target = target_document();
    let scope = SyncScope::custom(ElementKind::Variable, "label").unwrap().within(Some("ORG"));
    let synchronizer = Synchronizer::new(&template, scope, KeyRule::Trailing(3));

    synchronizer.apply(&mut target);
    let snapshot = target.clone();
    let report = synchronizer.apply(&mut target);

    std::assert_eq!(report.updated, 0);
    std::assert_eq!(report.unchanged, 2);
    std::assert_eq!(target, snapshot);
}

#[test]
fn test_incomplete_source_nodes_are_not_indexed() {
    let template = template_document();
    let scope = SyncScope::preset("table-full").unwrap();
    let synchronizer = Synchronizer::new(&template, scope, KeyRule::AfterLastUnderscore);

    std::assert!(synchronizer.index().is_empty());
    std::assert_eq!(synchronizer.index().incomplete(), 2);
}

#[test]
fn test_plan_with_display_name_and_tables() {
    let template = template_document();
    let mut target = target_document();

    let plan = SyncPlan::new(KeyRule::AfterLastUnderscore)
        .with_scope(
            SyncScope::custom(ElementKind::Table, "title,titleWrapped,Visible")
                .unwrap()
                .within(Some("ORG")),
        )
        .with_display_name(true);
    let reports = plan.prepare(&template).unwrap().apply(&mut target).unwrap();

    std::assert_eq!(reports.len(), 1);
    std::assert_eq!(reports[0].updated, 1);
    std::assert_eq!(target.root.attr("DisplayName"), Some("Padron Continuo 2019"));

    let table = Selector::tag("table").within(Some("ORG")).select(&target.root)[0];
    std::assert_eq!(table.attr("title"), Some("Población"));
    std::assert_eq!(table.attr("Visible"), Some("true"));
}

#[test]
fn test_empty_plan_is_rejected() {
    let template = template_document();
    std::assert!(SyncPlan::new(KeyRule::Exact).prepare(&template).is_err());
}

#[test]
fn test_display_name_without_year_gets_year_appended() {
    let template = Document::parse_str(r#"<survey name="RENTA2016" DisplayName="Renta" year="2016"/>"#).unwrap();
    let mut target = Document::parse_str(r#"<survey name="RENTA2017" DisplayName=""/>"#).unwrap();

    let name = sync_display_name(&template.root, &mut target.root).unwrap();
    std::assert_eq!(name, "Renta 2017");

    let mut undated = Document::parse_str(r#"<survey name="RENTA" DisplayName=""/>"#).unwrap();
    std::assert!(sync_display_name(&template.root, &mut undated.root).is_err());
}

#[test]
fn test_survey_year() {
    std::assert_eq!(survey_year("PC2018"), Some("2018"));
    std::assert_eq!(survey_year("ELECH1923"), Some("1923"));
    std::assert_eq!(survey_year("CED"), None);
    std::assert_eq!(survey_year("PC20X8"), None);
}

#[test]
fn test_patch_attributes_policy() {
    let mut doc = Document::parse_str(r#"<variable name="a" label="x" PN="blues"/>"#).unwrap();
    let element = &mut doc.root;

    std::assert_eq!(
        patch_attributes(element, vec![("label", "y"), ("FR", "rule")]),
        PatchOutcome::MissingAttribute("FR".to_string())
    );
    std::assert_eq!(element.attr("label"), Some("x"));

    std::assert_eq!(patch_attributes(element, vec![("label", "y"), ("PN", "blues")]), PatchOutcome::Updated(1));
    std::assert_eq!(patch_attributes(element, vec![("label", "y")]), PatchOutcome::Unchanged);
}

#[test]
fn test_batch_rewrites_each_target() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("PC2019.xml");
    let second = dir.path().join("PC2020.xml");
    target_document().save(&first).unwrap();
    let mut next_year = target_document();
    next_year.root.set_attr("name", "PC2020");
    next_year.save(&second).unwrap();

    let plan = SyncPlan::new(KeyRule::Trailing(8))
        .with_scope(SyncScope::custom(ElementKind::Variable, "label").unwrap().within(Some("ORG")));
    let prepared = plan.prepare(&template_document()).unwrap();

    let mut seen = Vec::new();
    let total = prepared
        .apply_files(&[first.clone(), second.clone()], |path| seen.push(path.to_path_buf()))
        .unwrap();

    std::assert_eq!(seen, vec![first.clone(), second.clone()]);
    std::assert_eq!(total.updated, 4);
    let saved = Document::load(&second).unwrap();
    std::assert_eq!(variable(&saved, "PC2019_T001_001").attr("label"), Some("PoblaciónTotal"));
}

#[test]
fn test_batch_stops_at_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let plan = SyncPlan::new(KeyRule::Exact).with_display_name(true);
    let prepared = plan.prepare(&template_document()).unwrap();
    std::assert!(prepared.apply_files(&[dir.path().join("missing.xml")], |_| {}).is_err());
}
