use deunicode::deunicode_with_tofu;

/// Converts free text into a lowercase, hyphen-separated slug.
///
/// Non-ASCII text is transliterated first (`Ōzeki` → `ozeki`, kanji to
/// their pinyin reading), characters without a transliteration are dropped. Runs of
/// anything that is not an ASCII letter or digit then collapse into a single
/// hyphen, and the result never starts or ends with one. Apostrophes are
/// dropped rather than turned into separators. Slugifying a slug returns it
/// unchanged.
pub fn slugify(input: &str) -> String {
    let ascii = deunicode_with_tofu(input, "");
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if !matches!(c, '\'' | '`') {
            pending_hyphen = true;
        }
    }

    slug
}
