//! String utility functions
//!
//! Name shortening and casing helpers shared by the generator and the
//! cut point writer.

/// Characters replaced by a space before building an acronym
const ACRONYM_SEPARATORS: [char; 10] = ['(', ')', '&', '/', ',', '.', '\\', '\'', '%', '#'];

/// Build an acronym from a label
///
/// Multi-word labels keep their first character as is, followed by the
/// upper-cased first character of every following word
/// (`"County Subdivision"` → `"CS"`, `"census tract"` → `"cT"`).
/// Single words are upper-cased (`"Nation"` → `"NATION"`).
pub fn create_acronym(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| if ACRONYM_SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();
    let words: Vec<&str> = cleaned.split(' ').filter(|w| !w.is_empty()).collect();

    match words.as_slice() {
        [] => String::new(),
        [single] => single.to_uppercase(),
        [first, rest @ ..] => {
            let mut acronym: String = first.chars().take(1).collect();
            for word in rest {
                if let Some(c) = word.chars().next() {
                    acronym.extend(c.to_uppercase());
                }
            }
            acronym
        }
    }
}

/// Title-case a string: the first letter of every run of letters is
/// upper-cased and the rest lower-cased (`"light blue"` → `"Light Blue"`,
/// `"median_income"` → `"Median_Income"`)
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}

/// Byte position just after the `n`-th occurrence (1-based) of `separator`
pub fn after_nth(text: &str, separator: char, n: usize) -> Option<&str> {
    let (index, _) = text.match_indices(separator).nth(n.checked_sub(1)?)?;
    Some(&text[index + separator.len_utf8()..])
}
