/// Escapes LIKE/ILIKE metacharacters in a user-supplied search term so it
/// matches literally when wrapped in `%...%`.
pub fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
