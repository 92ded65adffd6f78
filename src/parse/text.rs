use scraper::ElementRef;

/// Descendant text of `element` with every text node trimmed, empty nodes
/// dropped, and the rest joined by `separator`. Whitespace inside a single
/// text node is left untouched.
pub(super) fn collected_text(element: ElementRef, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
