//! URL-safe slugs from source identifiers

/// Slug for a source page name such as `blog-My First Post.html`.
///
/// The collection `prefix` and a trailing `.html` are stripped, the rest is
/// lower-cased, and every run of characters that is not alphanumeric becomes
/// a single `-`. Non-Latin letters are kept. An empty result is `untitled`.
pub fn slug_from_source(name: &str, prefix: &str) -> String {
    let name = name.strip_suffix(".html").unwrap_or(name);
    let name = name.strip_prefix(prefix).unwrap_or(name);

    let mut slug = String::with_capacity(name.len());
    let mut dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if dash && !slug.is_empty() {
                slug.push('-');
            }
            dash = false;
            slug.push(c);
        } else {
            dash = true;
        }
    }

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}
