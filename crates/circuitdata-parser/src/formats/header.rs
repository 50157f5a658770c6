use std::collections::HashSet;

use csv::StringRecord;

/// Names empty header cells `Unnamed: {position}` and suffixes repeated
/// names with `.1`, `.2`, ... so every column has a unique label.
pub fn normalise_headers(record: &StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(record.len());

    for (position, raw) in record.iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {position}")
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}
