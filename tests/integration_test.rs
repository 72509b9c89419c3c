//! Integration tests for the MetaKit facade

extern crate std;

use std::fs;
use std::path::Path;

use metakit::metadata::query::Selector;
use metakit::metadata::{is_valid_guid, Document};
use metakit::sync::ElementKind;
use metakit::{CharRepair, CutpointOptions, KeyRule, MergeOptions, MetaKit, SyncPlan, SyncScope};

const PREVIOUS_YEAR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<survey GUID="11111111-1111-4111-8111-111111111111" name="PC2019" DisplayName="Padron Continuo 2019" year="2019">
  <SurveyDatasets>
    <SurveyDataset abbreviation="SE" name="Social Explorer Tables">
      <tables>
        <table GUID="22222222-2222-4222-8222-222222222222" name="T001" title="PoblaciÃ³n" titleWrapped="PoblaciÃ³n">
          <variable GUID="33333333-3333-4333-8333-333333333333" name="T001_001" label="Total" qLabel="Total" AggregationStr="Add" FormulaFunctionBodyCSharp="return PC2019_T001_001;"/>
        </table>
      </tables>
    </SurveyDataset>
    <SurveyDataset abbreviation="ORG" name="Original Tables">
      <tables>
        <table GUID="44444444-4444-4444-8444-444444444444" name="PC2019_T001" title="PoblaciÃ³n" titleWrapped="PoblaciÃ³n">
          <variable GUID="55555555-5555-4555-8555-555555555555" name="PC2019_T001_001" label="PoblaciÃ³nTotal" qLabel="Total" indent="0" formatting="9"/>
        </table>
      </tables>
    </SurveyDataset>
  </SurveyDatasets>
</survey>
"#;

fn generator_config(output: &Path) -> String {
    format!(
        r#"
project_name = "Padron Continuo 2020"
project_id = "PC2020"
project_year = 2020
project_date = 2020-06-30
metadata_file_name = "PC2020.xml"
output_directory = '{}'

[database]
server = "prime"
name = "PC2020"
user = "loader"
password = "secret"

[[geo_levels]]
sumlev = "SL010"
label = "Nation"
fips_length = 2
partial_fips_length = 2
indent = 0

[[geo_levels]]
sumlev = "SL040"
label = "Province"
fips_length = 4
partial_fips_length = 2
indent = 1

[tables]
source = "inline"

[[tables.tables]]
name = "T001"
title = "Population"

[[tables.tables.variables]]
name = "T001_001"
label = "Total"
"#,
        output.display()
    )
}

#[test]
fn test_new_year_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("metakit.log");
    let kit = MetaKit::new(Some(log.as_path())).unwrap();

    // last year's document carries mis-decoded labels
    let previous = dir.path().join("PC2019.xml");
    fs::write(&previous, PREVIOUS_YEAR).unwrap();
    let repaired = kit.repair(dir.path(), None, &CharRepair::defaults()).unwrap();
    std::assert_eq!(repaired.files_changed, 1);
    std::assert_eq!(repaired.attributes_repaired, 5);

    // generate the new year's document
    let config = dir.path().join("metakit.toml");
    fs::write(&config, generator_config(&dir.path().join("out"))).unwrap();
    let (generated, stats) = kit.generate(&config).unwrap();
    std::assert_eq!(stats.tables, 1);
    std::assert_eq!(stats.geo_types, 2);
    let document = Document::load(&generated).unwrap();
    std::assert_eq!(document.root.attr("name"), Some("PC2020"));

    // copy the hand-made tables over
    let merged = kit.merge(&previous, &generated, None, &MergeOptions::default()).unwrap();
    std::assert_eq!(merged.tables, 1);
    let document = Document::load(&generated).unwrap();
    let se_variables = Selector::tag("variable").within(Some("SE")).select(&document.root);
    std::assert_eq!(se_variables.len(), 1);
    std::assert!(is_valid_guid(se_variables[0].attr("GUID").unwrap()));
    std::assert_eq!(se_variables[0].attr("FormulaFunctionBodyCSharp"), Some("return PC2020_T001_001;"));

    // and last year's labels and display name
    let plan = SyncPlan::new(KeyRule::Trailing(8))
        .with_scope(SyncScope::custom(ElementKind::Variable, "label").unwrap().within(Some("ORG")))
        .with_display_name(true);
    kit.sync(&previous, &[generated.clone()], &plan).unwrap();
    let document = Document::load(&generated).unwrap();
    std::assert_eq!(document.root.attr("DisplayName"), Some("Padron Continuo 2020"));
    let org_variables = Selector::tag("variable").within(Some("ORG")).select(&document.root);
    std::assert_eq!(org_variables[0].attr("label"), Some("PoblaciónTotal"));

    let log_content = fs::read_to_string(&log).unwrap();
    for command in ["repair", "generate", "merge", "sync"] {
        std::assert!(log_content.contains(&format!("{} ", command)), "no {} summary", command);
    }
}

#[test]
fn test_cutpoints_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let kit = MetaKit::new(None).unwrap();

    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("elec.csv"), "votes\n0\n271\n300\n479\n838\n900\n1066\n").unwrap();
    let options = CutpointOptions {
        project_id: "ELEC2019".to_string(),
        classes: 3,
        output_directory: dir.path().join("filters"),
    };
    let report = kit.cutpoints(&data, &options).unwrap();
    std::assert_eq!(report.columns_written, 1);
    let filters = Document::load(dir.path().join("filters").join("ELEC2019votes.xml")).unwrap();
    std::assert_eq!(filters.root.attr("name"), Some("cutpoints_ELEC2019_Votes"));

    let metadata = dir.path().join("ELEC2019.xml");
    fs::write(
        &metadata,
        r#"<survey name="ELEC2019" DisplayName=""><variable name="ELEC2019_T001_001" label="" FR="" PN="" AggregationStr=""/></survey>"#,
    )
    .unwrap();
    let settings = dir.path().join("settings.csv");
    fs::write(
        &settings,
        "survey_id,project_name,variable_id,variable_new_name,color_palette,cutpoints,type_of_map\n\
         ELEC2019,Elecciones 2019,T001_001,Votos,reds,cutpoints_ELEC2019_Votes,shaded\n",
    )
    .unwrap();
    let palettes = dir.path().join("palettes.json");
    fs::write(&palettes, r#"[{"title": "Reds", "id": "reds-9"}]"#).unwrap();

    let report = kit.apply_overrides(&settings, Some(palettes.as_path()), &[metadata.clone()]).unwrap();
    std::assert_eq!(report.variables_updated, 1);

    let document = Document::load(&metadata).unwrap();
    std::assert_eq!(document.root.attr("DisplayName"), Some("Elecciones 2019"));
    let variable = document.root.child("variable").unwrap();
    std::assert_eq!(variable.attr("label"), Some("Votos"));
    std::assert_eq!(variable.attr("PN"), Some("reds-9"));
    std::assert_eq!(variable.attr("FR"), Some("cutpoints_ELEC2019_Votes"));
    std::assert_eq!(variable.attr("AggregationStr"), Some("Rate|||100000"));
}
