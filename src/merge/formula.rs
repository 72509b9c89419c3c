//! Aggregation formulas
//!
//! `AggregationStr` values are `|` separated: the method name followed by
//! method specific fields, some of which reference other tables or variables
//! by GUID (`Rate|<numerator GUID>|<denominator GUID>|100000`).

/// Field positions holding GUID references for an aggregation method
pub fn reference_positions(method: &str) -> &'static [usize] {
    match method {
        "Median" => &[2],
        "DivisionOfSums" => &[1, 2],
        "WeightedAvg" => &[1],
        "Rate" => &[1, 2],
        _ => &[],
    }
}

/// Outcome of rewriting one formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemappedFormula {
    pub formula: String,
    pub remapped: usize,
    /// GUIDs that could not be resolved and were kept as is
    pub unresolved: Vec<String>,
}

/// Rewrite an aggregation formula
///
/// Every non-empty reference field is passed to `resolve`, which returns the
/// replacement GUID or `None` to keep the field. `rename` is applied to all
/// other fields.
pub fn remap_formula<R, N>(formula: &str, mut resolve: R, rename: N) -> RemappedFormula
where
    R: FnMut(&str) -> Option<String>,
    N: Fn(&str) -> String,
{
    let mut fields: Vec<String> = formula.split('|').map(|f| f.to_string()).collect();
    let positions = reference_positions(&fields[0]);
    let mut result = RemappedFormula { formula: String::new(), remapped: 0, unresolved: Vec::new() };

    for (index, field) in fields.iter_mut().enumerate() {
        if !positions.contains(&index) {
            *field = rename(field);
            continue;
        }
        if field.is_empty() {
            continue;
        }
        match resolve(field) {
            Some(guid) => {
                if guid != *field {
                    result.remapped += 1;
                }
                *field = guid;
            }
            None => result.unresolved.push(field.clone()),
        }
    }

    result.formula = fields.join("|");
    result
}
