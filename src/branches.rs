use std::collections::HashSet;

/// Turns free-form branch input into an ordered list of unique branch names.
///
/// Any comma or newline separates entries. Entries are trimmed, empty ones are
/// dropped and the first occurrence of a repeated name keeps its position.
pub fn normalize_branches(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut branches = Vec::new();

    for entry in input.split(|c| c == ',' || c == '\n') {
        let name = entry.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name) {
            branches.push(name.to_string());
        }
    }

    branches
}
