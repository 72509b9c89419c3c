//! Tests for settings-driven overrides

extern crate std;

use std::fs;
use std::path::Path;

use crate::metadata::document::Document;
use crate::metadata::query::Selector;
use crate::overrides::applier::{apply_overrides, override_file, SurveyOverrides};
use crate::overrides::palette::PaletteCatalog;
use crate::overrides::settings::{aggregation_for_map_type, OverrideSettings};

const SETTINGS: &str = "\
survey_id,project_name,file_name,table_old_name,table_new_name,variable_id,variable_new_name,color_palette,cutpoints,type_of_map,old_category_name,new_category_name
VEH2014,Vehículos 2014,veh.csv,Vehiculos,Vehículos,T001_001,Total vehículos,light blues,cutpoints_VEH2014_Total,Bubbles,Transporte,Movilidad
VEH2014,,,,,T001_002,,,,shaded,,
VEH2014,,,,,T001_003,Motos,,,,,
VEH2014,,,,,T009_001,Nada,,,,,
EVR2011,Encuesta 2011,,,,T001_001,Otra,,,,,
";

const PALETTES: &str = r#"[{"title": "Light Blues", "id": "lblues"}, {"title": "Reds", "id": 7}]"#;

fn settings_file(dir: &Path) -> OverrideSettings {
    let path = dir.join("settings.csv");
    fs::write(&path, SETTINGS).unwrap();
    OverrideSettings::load(&path).unwrap()
}

fn vehicles() -> Document {
    Document::parse_str(
        r#"<survey name="VEH2014" DisplayName="">
  <SurveyDatasets>
    <SurveyDataset abbreviation="ORG">
      <tables>
        <table name="VEH2014_T001" title="Vehiculos" titleWrapped="Vehiculos" DataCategories="Transporte">
          <variable name="VEH2014_T001_001" label="Total" PN="blues" FR="" AggregationStr="Add"/>
          <variable name="VEH2014_T001_002" label="Coches" PN="blues" FR="" AggregationStr="Add"/>
          <variable name="VEH2014_T001_003" qLabel="Motos"/>
        </table>
      </tables>
    </SurveyDataset>
  </SurveyDatasets>
</survey>"#,
    )
    .unwrap()
}

fn variable<'a>(doc: &'a Document, name: &str) -> &'a crate::metadata::Element {
    Selector::tag("variable")
        .select(&doc.root)
        .into_iter()
        .find(|v| v.attr("name") == Some(name))
        .unwrap()
}

#[test]
fn test_settings_rows_by_survey() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_file(dir.path());

    std::assert_eq!(settings.rows.len(), 5);
    std::assert_eq!(settings.survey_ids(), vec!["VEH2014", "EVR2011"]);
    std::assert_eq!(settings.for_survey("VEH2014").count(), 4);
    std::assert_eq!(settings.rows[0].project_name, "Vehículos 2014");
    std::assert_eq!(settings.rows[1].color_palette, "");
}

#[test]
fn test_map_types() {
    std::assert_eq!(aggregation_for_map_type("Bubbles"), Some("Add"));
    std::assert_eq!(aggregation_for_map_type("shaded"), Some("Rate|||100000"));
    std::assert_eq!(aggregation_for_map_type("SHADED "), Some("Rate|||100000"));
    std::assert_eq!(aggregation_for_map_type("dots"), None);
}

#[test]
fn test_palettes_are_matched_on_title_case() {
    let palettes = PaletteCatalog::from_json(PALETTES).unwrap();
    std::assert_eq!(palettes.len(), 2);
    std::assert_eq!(palettes.resolve("light blues"), Some("lblues"));
    std::assert_eq!(palettes.resolve("REDS"), Some("7"));
    std::assert_eq!(palettes.resolve("greens"), None);
    std::assert!(PaletteCatalog::from_json("{\"title\": 1}").is_err());
}

#[test]
fn test_empty_cells_set_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_file(dir.path());
    let palettes = PaletteCatalog::from_json(PALETTES).unwrap();

    let overrides = SurveyOverrides::collect(&settings, "VEH2014", &palettes);
    std::assert_eq!(overrides.display_name.as_deref(), Some("Vehículos 2014"));
    std::assert_eq!(overrides.variables["T001_001"].len(), 4);
    std::assert_eq!(overrides.variables["T001_002"], vec![("AggregationStr", "Rate|||100000".to_string())]);
    std::assert_eq!(overrides.variables["T001_003"], vec![("label", "Motos".to_string())]);
}

#[test]
fn test_overrides_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_file(dir.path());
    let palettes = PaletteCatalog::from_json(PALETTES).unwrap();
    let mut doc = vehicles();

    let report = apply_overrides(&mut doc, &settings, &palettes).unwrap();

    std::assert_eq!(doc.root.attr("DisplayName"), Some("Vehículos 2014"));
    let table = Selector::tag("table").select(&doc.root)[0];
    std::assert_eq!(table.attr("title"), Some("Vehículos"));
    std::assert_eq!(table.attr("titleWrapped"), Some("Vehículos"));
    std::assert_eq!(table.attr("DataCategories"), Some("Movilidad"));

    let first = variable(&doc, "VEH2014_T001_001");
    std::assert_eq!(first.attr("label"), Some("Total vehículos"));
    std::assert_eq!(first.attr("PN"), Some("lblues"));
    std::assert_eq!(first.attr("FR"), Some("cutpoints_VEH2014_Total"));
    std::assert_eq!(first.attr("AggregationStr"), Some("Add"));

    let second = variable(&doc, "VEH2014_T001_002");
    std::assert_eq!(second.attr("AggregationStr"), Some("Rate|||100000"));
    std::assert_eq!(second.attr("label"), Some("Coches"));

    // no label attribute to overwrite
    std::assert!(!variable(&doc, "VEH2014_T001_003").has_attr("label"));

    std::assert_eq!(report.display_names, 1);
    std::assert_eq!(report.tables_updated, 1);
    std::assert_eq!(report.variables_updated, 2);
    std::assert_eq!(report.skipped_missing_attribute, 1);
    std::assert_eq!(report.unmatched_variables, 1);
}

#[test]
fn test_unknown_survey_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_file(dir.path());
    let mut doc = Document::parse_str(r#"<survey name="CED2001" DisplayName="Censo"/>"#).unwrap();

    let report = apply_overrides(&mut doc, &settings, &PaletteCatalog::default()).unwrap();
    std::assert_eq!(report.display_names, 0);
    std::assert_eq!(doc.root.attr("DisplayName"), Some("Censo"));
}

#[test]
fn test_override_file_rewrites_it() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_file(dir.path());
    let path = dir.path().join("VEH2014.xml");
    vehicles().save(&path).unwrap();

    let report = override_file(&path, &settings, &PaletteCatalog::default()).unwrap();
    std::assert_eq!(report.files, 1);
    // the palette is unknown without a catalog
    std::assert_eq!(report.unknown_palettes, 1);

    let saved = Document::load(&path).unwrap();
    std::assert_eq!(variable(&saved, "VEH2014_T001_001").attr("PN"), Some("blues"));
    std::assert_eq!(variable(&saved, "VEH2014_T001_001").attr("label"), Some("Total vehículos"));
}
