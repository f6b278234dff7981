/// Characters that are unsafe in filenames on at least one supported platform.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\0'];

const MAX_LENGTH: usize = 100;

/// Turns an arbitrary display title into a filesystem-safe name. Total: always
/// returns a non-empty string, falling back to the package id and finally to
/// a literal "app".
pub fn sanitize(raw: &str, fallback_package: Option<&str>) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();

    let mut cleaned = replaced.split_whitespace().collect::<Vec<_>>().join("_");
    while cleaned.contains("__") {
        cleaned = cleaned.replace("__", "_");
    }
    let mut cleaned = cleaned.trim_matches('_').to_string();

    if cleaned.is_empty() {
        cleaned = fallback_package
            .map(|pkg| pkg.replace('.', "_"))
            .unwrap_or_default()
            .trim_matches('_')
            .to_string();
        if cleaned.is_empty() {
            cleaned = "app".to_string();
        }
    }

    if cleaned.chars().count() > MAX_LENGTH {
        cleaned = cleaned.chars().take(MAX_LENGTH).collect();
        cleaned = cleaned.trim_end_matches('_').to_string();
    }

    cleaned
}
