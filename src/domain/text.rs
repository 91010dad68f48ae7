/// Return at most the first `max_chars` characters of `text`.
///
/// Cuts on a char boundary, so multi-byte text extracted from PDFs is safe.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    let end = text
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}
