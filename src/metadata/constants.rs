//! Metadata vocabulary constants
//!
//! Element and attribute names of the survey metadata format, plus the
//! attribute presets used when synchronizing documents. Keeping them here
//! replaces string literals scattered through the processing code.

/// Element (tag) names
pub mod tags {
    pub const SURVEY: &str = "survey";
    pub const SURVEY_DATASETS: &str = "SurveyDatasets";
    pub const SURVEY_DATASET: &str = "SurveyDataset";
    pub const GEO_SURVEY_DATASET: &str = "GeoSurveyDataset";
    pub const TABLES: &str = "tables";
    pub const TABLE: &str = "table";
    pub const VARIABLE: &str = "variable";
    pub const GEO_TYPES: &str = "geoTypes";
    pub const GEO_TYPE: &str = "geoType";
    pub const DATASETS: &str = "datasets";
    pub const DATASET: &str = "dataset";
    pub const CATEGORY_FILTERS: &str = "CategoryFilters";
    pub const FILTER_SET: &str = "FilterSet";
    pub const FILTER: &str = "Filter";
}

/// Attribute names shared by several element kinds
pub mod attrs {
    pub const GUID: &str = "GUID";
    pub const NAME: &str = "name";
    pub const ABBREVIATION: &str = "abbreviation";
    pub const DISPLAY_NAME: &str = "DisplayName";
    pub const YEAR: &str = "year";

    // table
    pub const TITLE: &str = "title";
    pub const TITLE_WRAPPED: &str = "titleWrapped";
    pub const DATA_CATEGORIES: &str = "DataCategories";

    // variable
    pub const LABEL: &str = "label";
    pub const Q_LABEL: &str = "qLabel";
    pub const AGGREGATION_STR: &str = "AggregationStr";
    pub const FORMULA_BODY: &str = "FormulaFunctionBodyCSharp";
    pub const FILTER_RULE: &str = "FR";
    pub const PALETTE_NAME: &str = "PN";
}

/// Well-known survey dataset abbreviations
pub mod datasets {
    /// Tables imported from the raw data files
    pub const ORIGINAL: &str = "ORG";
    /// Derived tables maintained by hand
    pub const DERIVED: &str = "SE";
    /// Geography summary file
    pub const GEOGRAPHY: &str = "Geo";
}

/// Attribute presets used by the synchronizer
pub mod presets {
    /// Formatting and aggregation attributes of a variable
    pub const VARIABLE_FORMATTING: &[&str] = &[
        "indent",
        "dataType",
        "dataTypeLength",
        "formatting",
        "aggMethod",
        "AggregationStr",
        "customFormatStr",
        "suppType",
        "SuppField",
        "suppFlags",
        "BubbleSizeHint",
    ];

    /// Formatting plus map presentation and label attributes of a variable
    pub const VARIABLE_FULL: &[&str] = &[
        "indent",
        "dataType",
        "dataTypeLength",
        "formatting",
        "aggMethod",
        "AggregationStr",
        "customFormatStr",
        "suppType",
        "SuppField",
        "suppFlags",
        "BubbleSizeHint",
        "FR", // filter rule
        "PN", // palette name
        "PT", // palette type
        "label",
        "qLabel",
    ];

    /// Aggregation and map attributes of a variable
    pub const VARIABLE_AGGREGATION: &[&str] = &[
        "aggMethod",
        "AggregationStr",
        "BubbleSizeHint",
        "FR",
        "PN",
    ];

    /// Descriptive attributes of a table
    pub const TABLE_FULL: &[&str] = &[
        "VariablesAreExclusive",
        "notes",
        "PrivateNotes",
        "TableMapInfo",
        "DollarYear",
        "PercentBaseMin",
        "title",
        "titleWrapped",
        "titleShort",
        "universe",
        "Visible",
        "VisibleInMaps",
        "TreeNodeCollapsed",
        "DocSectionLinks",
        "DataCategories",
        "ProductTags",
        "FilterRuleName",
        "CategoryPriorityOrder",
        "PaletteType",
        "PaletteInverse",
        "PaletteName",
        "ShowOnFirstPageOfCategoryListing",
        "DbTableSuffix",
        "source",
        "DefaultColumnCaption",
        "samplingInfo",
    ];
}
