#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    PackageId,
    FreeText,
}

/// A query is a package identifier when it looks like a reverse-domain name:
/// at least one dot, no whitespace, none of the path/query characters.
pub fn classify(query: &str) -> QueryKind {
    let query = query.trim();

    let has_dot = query.contains('.');
    let has_whitespace = query.chars().any(char::is_whitespace);
    let has_path_chars = query.contains(|c: char| matches!(c, '/' | '\\' | '?'));

    if has_dot && !has_whitespace && !has_path_chars {
        QueryKind::PackageId
    } else {
        QueryKind::FreeText
    }
}
