//! Tests for geography elements and naming helpers

extern crate std;

use crate::generator::geography::{geo_id_table, geo_types, nesting_fips, plural_name, relevant_geo_ids};
use crate::generator::model::GeoLevel;
use crate::metadata::guid::{is_valid_guid, GuidAllocator};
use crate::utils::string_utils::{after_nth, create_acronym, title_case};

fn us_levels() -> Vec<GeoLevel> {
    vec![
        GeoLevel::new("SL010", "Nation", 1, 1, 0),
        GeoLevel::new("SL040", "State", 2, 2, 1),
        GeoLevel::new("SL050", "County", 5, 3, 2),
    ]
}

#[test]
fn test_create_acronym() {
    std::assert_eq!(create_acronym("Nation"), "NATION");
    std::assert_eq!(create_acronym("County Subdivision"), "CS");
    std::assert_eq!(create_acronym("census tract"), "cT");
    std::assert_eq!(create_acronym("Census Tract (2010)"), "CT2");
    std::assert_eq!(create_acronym("  Place / Remainder  "), "PR");
    std::assert_eq!(create_acronym(""), "");
}

#[test]
fn test_title_case() {
    std::assert_eq!(title_case("light blue"), "Light Blue");
    std::assert_eq!(title_case("MEDIAN income"), "Median Income");
    std::assert_eq!(title_case("median_income"), "Median_Income");
}

#[test]
fn test_after_nth() {
    std::assert_eq!(after_nth("PC2019_T001_001", '_', 2), Some("001"));
    std::assert_eq!(after_nth("PC2019_T001_001", '_', 1), Some("T001_001"));
    std::assert_eq!(after_nth("PC2019_T001", '_', 2), None);
    std::assert_eq!(after_nth("PC2019_T001", '_', 0), None);
}

#[test]
fn test_nesting_fips_walks_up_to_the_first_nested_level() {
    let levels = us_levels();
    std::assert_eq!(nesting_fips(&levels, 0), "SL010_FIPS");
    std::assert_eq!(nesting_fips(&levels, 1), "SL040_FIPS");
    std::assert_eq!(nesting_fips(&levels, 2), "SL040_FIPS,SL050_FIPS");
}

#[test]
fn test_nesting_fips_skips_sibling_levels() {
    let mut levels = us_levels();
    levels.push(GeoLevel::new("SL160", "Place", 7, 5, 2));
    levels.push(GeoLevel::new("SL140", "Census Tract", 11, 6, 3));

    std::assert_eq!(nesting_fips(&levels, 4), "SL040_FIPS,SL160_FIPS,SL140_FIPS");
}

#[test]
fn test_nesting_fips_stops_at_levels_without_fips() {
    let levels = vec![
        GeoLevel::new("SL040", "State", 2, 2, 1),
        GeoLevel::new("SL795", "Zone", 0, 0, 1),
        GeoLevel::new("SL050", "County", 5, 3, 2),
    ];
    std::assert_eq!(nesting_fips(&levels, 2), "SL050_FIPS");
}

#[test]
fn test_plural_names() {
    let mut levels = us_levels();
    std::assert_eq!(plural_name(&levels[2]), "Counties");

    levels.push(GeoLevel::new("SL160", "Place", 7, 5, 2));
    std::assert_eq!(plural_name(&levels[3]), "Place");

    levels[3].plural = Some("Places".to_string());
    std::assert_eq!(plural_name(&levels[3]), "Places");
}

#[test]
fn test_geo_type_elements() {
    let levels = us_levels();
    let mut guids = GuidAllocator::new();
    let types = geo_types(&levels, &mut guids);

    std::assert_eq!(relevant_geo_ids(&levels), "FIPS,NAME,QName,NATION,STATE,COUNTY");
    std::assert_eq!(types.len(), 3);

    let county = &types[2];
    std::assert!(is_valid_guid(county.attr("GUID").unwrap()));
    std::assert_eq!(county.attr("Name"), Some("SL050"));
    std::assert_eq!(county.attr("PluralName"), Some("Counties"));
    std::assert_eq!(county.attr("Sumlev"), Some("050"));
    std::assert_eq!(county.attr("Indent"), Some("2"));
    std::assert_eq!(county.attr("FipsCodePartialFieldName"), Some("COUNTY"));
    std::assert_eq!(county.child("Visible").unwrap().text(), "true");
}

#[test]
fn test_geo_id_table() {
    let levels = us_levels();
    let mut guids = GuidAllocator::new();
    let table = geo_id_table(&levels, &mut guids);

    std::assert_eq!(table.attr("name"), Some("G001"));
    let names: Vec<&str> = table
        .elements()
        .filter(|e| e.name == "variable")
        .map(|v| v.attr("name").unwrap())
        .collect();
    std::assert_eq!(names, vec!["QNAME", "NAME", "FIPS", "NATION", "STATE", "COUNTY"]);
    std::assert_eq!(guids.issued(), 7);
}
