//! Geography elements of a generated document
//!
//! Builds the `geoType` list, the per-level `dataset` descriptors and the
//! geography identifiers table `G001` from the configured geo levels.

use crate::generator::builder::ElementBuilder;
use crate::generator::model::GeoLevel;
use crate::generator::tables::{output_format, VARIABLE_PREAMBLE, VARIABLE_TRAILER};
use crate::metadata::document::Element;
use crate::metadata::guid::GuidAllocator;
use crate::utils::string_utils::create_acronym;

/// Plural forms known without configuration
const KNOWN_PLURALS: [(&str, &str); 4] = [
    ("County", "Counties"),
    ("State", "States"),
    ("Nation", "Nations"),
    ("Province", "Provinces"),
];

/// Plural label of a level: the configured one, a known one, or the label itself
pub fn plural_name(level: &GeoLevel) -> String {
    if let Some(plural) = &level.plural {
        return plural.clone();
    }
    KNOWN_PLURALS
        .iter()
        .find(|(singular, _)| *singular == level.label)
        .map(|(_, plural)| plural.to_string())
        .unwrap_or_else(|| level.label.clone())
}

/// `RelevantGeoIDs` value shared by every geo type
pub fn relevant_geo_ids(levels: &[GeoLevel]) -> String {
    let acronyms: Vec<String> = levels.iter().map(|l| create_acronym(&l.label)).collect();
    format!("FIPS,NAME,QName,{}", acronyms.join(","))
}

/// FIPS columns identifying a row of the level at `position`
///
/// Walks up the preceding levels, stopping at a level with indent 0 or no
/// FIPS code, and skipping levels that share their indent with the next
/// level or are not above the starting one. Returned top-down, comma
/// separated (`SL040_FIPS,SL050_FIPS` for a county under a state).
pub fn nesting_fips(levels: &[GeoLevel], position: usize) -> String {
    let start = &levels[position];
    let mut columns = vec![start.fips_column()];

    for i in (0..position).rev() {
        let level = &levels[i];
        if level.indent == 0 || level.fips_length == 0 {
            break;
        }
        if level.indent == levels[i + 1].indent || level.indent >= start.indent {
            continue;
        }
        columns.push(level.fips_column());
    }

    columns.reverse();
    columns.join(",")
}

/// One `geoType` element per level
pub fn geo_types(levels: &[GeoLevel], guids: &mut GuidAllocator) -> Vec<Element> {
    let relevant = relevant_geo_ids(levels);

    levels
        .iter()
        .map(|level| {
            ElementBuilder::new("geoType")
                .attr("GUID", &guids.issue())
                .attr("Name", &level.sumlev)
                .attr("Label", &level.label)
                .attr("QLabel", &level.label)
                .attr("RelevantGeoIDs", &relevant)
                .attr("PluralName", &plural_name(level))
                .attr("fullCoverage", "true")
                .attr("majorGeo", "true")
                .attr("Indent", &level.indent.to_string())
                .attr("Sumlev", level.sumlev_number())
                .attr("FipsCodeLength", &level.fips_length.to_string())
                .attr("FipsCodeFieldName", "FIPS")
                .attr("FipsCodePartialFieldName", &create_acronym(&level.label))
                .attr("FipsCodePartialLength", &level.partial_fips_length.to_string())
                .child(ElementBuilder::new("Visible").text("true"))
                .build()
        })
        .collect()
}

/// Database coordinates written into every `dataset` element
#[derive(Debug, Clone)]
pub struct DatasetTarget<'a> {
    pub project_id: &'a str,
    pub connection_string: &'a str,
    pub db_name: &'a str,
}

/// One `dataset` element per level
///
/// `geo_id_suffix` returns the suffix (with its leading `_`) of the first
/// data table of a level.
pub fn datasets<F>(
    levels: &[GeoLevel],
    target: &DatasetTarget<'_>,
    geo_id_suffix: F,
    guids: &mut GuidAllocator,
) -> Vec<Element>
where
    F: Fn(&GeoLevel) -> String,
{
    levels
        .iter()
        .enumerate()
        .map(|(position, level)| {
            let prefix = format!("{}_{}_", target.project_id, level.sumlev);
            let geo_id_table = format!("{}_{}{}", target.project_id, level.sumlev, geo_id_suffix(level));

            ElementBuilder::new("dataset")
                .attr("GUID", &guids.issue())
                .attr("GeoTypeName", &level.sumlev)
                .attr("DbConnString", target.connection_string)
                .attr("DbName", target.db_name)
                .attr("GeoIdDbTableName", &geo_id_table)
                .attr("IsCached", "false")
                .attr("DbTableNamePrefix", &prefix)
                .attr("DbPrimaryKey", &nesting_fips(levels, position))
                .attr("DbCopyCount", "1")
                .build()
        })
        .collect()
}

fn geo_id_variable(field: &str, label: &str, guids: &mut GuidAllocator) -> Element {
    ElementBuilder::new("variable")
        .attr("GUID", &guids.issue())
        .attrs(VARIABLE_PREAMBLE)
        .attr("name", &create_acronym(field))
        .attr("label", label)
        .attr("qLabel", "")
        .attr("indent", "0")
        .attr("dataType", "2")
        .attr("dataTypeLength", "0")
        .attr("formatting", "0")
        .attrs(VARIABLE_TRAILER)
        .attr("aggMethod", "0")
        .attr("DocLinksAsString", "")
        .attr("AggregationStr", "None")
        .build()
}

/// The `G001` geography identifiers table
pub fn geo_id_table(levels: &[GeoLevel], guids: &mut GuidAllocator) -> Element {
    let mut fields: Vec<(String, String)> = vec![
        ("QName".to_string(), "Qualifying Name".to_string()),
        ("Name".to_string(), "Name of Area".to_string()),
        ("FIPS".to_string(), "FIPS".to_string()),
    ];
    fields.extend(levels.iter().map(|l| (l.label.to_uppercase(), l.label.clone())));

    let variables: Vec<Element> = fields
        .iter()
        .map(|(field, label)| geo_id_variable(field, label, guids))
        .collect();

    ElementBuilder::new("table")
        .child(output_format())
        .children(variables)
        .attr("GUID", &guids.issue())
        .attrs([
            ("VariablesAreExclusive", "false"),
            ("notes", ""),
            ("PrivateNotes", ""),
            ("DollarYear", "0"),
            ("PercentBaseMin", "1"),
            ("name", "G001"),
            ("displayName", "G1."),
            ("title", "Geography Identifiers"),
            ("titleWrapped", "Geography Identifiers"),
            ("titleShort", ""),
            ("universe", "none"),
            ("Visible", "false"),
            ("TreeNodeCollapsed", "true"),
            ("DocSectionLinks", ""),
            ("DataCategories", ""),
            ("ProductTags", ""),
            ("FilterRuleName", ""),
            ("CategoryPriorityOrder", "0"),
            ("ShowOnFirstPageOfCategoryListing", "false"),
            ("DbTableSuffix", "001"),
            ("uniqueTableId", "G001"),
            ("source", ""),
            ("DefaultColumnCaption", ""),
            ("samplingInfo", ""),
        ])
        .build()
}
