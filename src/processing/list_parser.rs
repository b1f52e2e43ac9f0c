//! Splitting of delimited free-text fields (skills, degrees)

const DELIMITERS: &[char] = &[',', ';', '|'];

/// Split on comma, semicolon or pipe, trim every token and drop the empty
/// ones. Source order is kept; duplicates are not removed.
pub fn parse_list(value: Option<&str>) -> Vec<String> {
    match value {
        Some(text) => text
            .split(DELIMITERS)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
