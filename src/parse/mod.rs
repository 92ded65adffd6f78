mod menu_item;
mod static_selector;
mod text;

pub use menu_item::MenuItem;

use scraper::Html;

use crate::static_selector;

/// Menu entries of one daily page, in document order. Entries the board
/// renders degenerately still yield a record (fallback fields); html5ever
/// error-corrects arbitrary input, so this never fails outright.
pub fn menu_items(html: &str) -> Vec<MenuItem> {
    static_selector!(MENU_ENTRY_SELECTOR <- "li.more");
    let document = Html::parse_document(html);
    document
        .select(&MENU_ENTRY_SELECTOR)
        .map(MenuItem::from_html_element)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_idempotent() {
        let html = std::fs::read_to_string("./src/parse/html_examples/menu_page.html").unwrap();
        assert_eq!(menu_items(&html), menu_items(&html));
    }

    #[test]
    fn test_page_without_entries_parses_to_empty() {
        assert!(menu_items("<html><body><p>휴무</p></body></html>").is_empty());
        assert!(menu_items("").is_empty());
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let items = menu_items("<<<li class=more ><div class=label>x</liv>");
        // whatever html5ever salvages, each record is fully populated
        for item in items {
            assert!(!item.time.is_empty());
        }
    }
}
