//! Text normalisation shared by lexical scoring and feature hashing.

/// Split text into lowercase alphanumeric tokens.
///
/// Any non-alphanumeric character is a separator, so IRIs break into their
/// path segments: `https://example.org/Jupiter` yields `https`, `example`,
/// `org`, `jupiter`.
///
/// Text with no alphanumeric characters at all (`☃`, `→`, `!!!`) falls back
/// to its whitespace-separated runs, so every non-blank literal has at least
/// one token.
pub fn tokenize(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect();

    if !tokens.is_empty() {
        return tokens;
    }
    text.split_whitespace().map(str::to_lowercase).collect()
}
