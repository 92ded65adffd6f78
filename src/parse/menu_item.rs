use scraper::ElementRef;

use crate::parse::text::collected_text;
use crate::static_selector;

/// Serving-time fallback when an entry carries no time input at all.
static UNKNOWN_TIME: &str = "unknown";

/// Decorative token the menu board sprinkles between dishes. Removed as a
/// literal; other punctuation is passed through untouched.
static DECORATIVE_SEPARATOR: &str = " · ";

/// One dish entry of the daily menu page.
///
/// Every field is always present: a missing sub-element degrades to the
/// field's fallback value instead of failing the record or the parse.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MenuItem {
    pub time: String,
    pub category: String,
    pub menu_name: String,
    pub price: String,
    pub calories: String,
    pub detail: String,
}

impl MenuItem {
    /// Reads one `li.more` entry node. Each field is extracted independently
    /// and scoped to `entry`; none of the lookups can fail the record.
    pub fn from_html_element(entry: ElementRef) -> Self {
        let (menu_name, price) = name_and_price(entry);
        let (calories, detail) = calories_and_detail(entry);
        Self {
            time: serving_time(entry),
            category: category(entry),
            menu_name,
            price,
            calories,
            detail,
        }
    }
}

/// Value of the serving-time input, e.g. `"1150"`. The board encodes the
/// slot in hidden inputs whose ids start with `sc`.
fn serving_time(entry: ElementRef) -> String {
    static_selector!(TIME_SELECTOR <- r#"input[id^="sc"]"#);
    match entry
        .select(&TIME_SELECTOR)
        .next()
        .and_then(|input| input.value().attr("value"))
    {
        Some(value) => value.to_owned(),
        None => UNKNOWN_TIME.to_owned(),
    }
}

/// Section label, e.g. a breakfast/lunch tag.
fn category(entry: ElementRef) -> String {
    static_selector!(LABEL_SELECTOR <- "div.label");
    entry
        .select(&LABEL_SELECTOR)
        .next()
        .map(|label| collected_text(label, ""))
        .unwrap_or_default()
}

/// Dish name and displayed price, both read from the title block. Without a
/// title block neither is looked up.
fn name_and_price(entry: ElementRef) -> (String, String) {
    static_selector!(TITLE_SELECTOR <- "h4.tit");
    static_selector!(NAME_SELECTOR <- "span.tit");
    static_selector!(PRICE_SELECTOR <- "span.price");
    if let Some(title) = entry.select(&TITLE_SELECTOR).next() {
        let name = title
            .select(&NAME_SELECTOR)
            .next()
            .map(|name| collected_text(name, ""))
            .unwrap_or_default();
        let price = title
            .select(&PRICE_SELECTOR)
            .next()
            .map(|price| collected_text(price, ""))
            .unwrap_or_default();
        (name, price)
    } else {
        (String::new(), String::new())
    }
}

/// Calorie text and cleaned description from the detail block.
fn calories_and_detail(entry: ElementRef) -> (String, String) {
    static_selector!(DETAIL_SELECTOR <- "p.dtl");
    static_selector!(CALORIE_SELECTOR <- "span.cal");
    if let Some(details) = entry.select(&DETAIL_SELECTOR).next() {
        let calories = details
            .select(&CALORIE_SELECTOR)
            .next()
            .map(|cal| collected_text(cal, ""))
            .unwrap_or_default();
        let detail = clean_detail(&collected_text(details, "\n"), &calories);
        (calories, detail)
    } else {
        (String::new(), String::new())
    }
}

/// Cleanup of the raw detail text, in this order: drop the calorie
/// substring, trim, turn line breaks into `", "`, strip the decorative
/// separator token.
fn clean_detail(raw: &str, calories: &str) -> String {
    let without_calories = if calories.is_empty() {
        raw.to_owned()
    } else {
        raw.replace(calories, "")
    };
    without_calories
        .trim()
        .replace('\n', ", ")
        .replace(DECORATIVE_SEPARATOR, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    use scraper::Html;

    use crate::parse::menu_items;

    fn only_item(html: &str) -> MenuItem {
        let document = Html::parse_document(html);
        let entry_selector = scraper::Selector::parse("li.more").unwrap();
        let entry = document
            .select(&entry_selector)
            .next()
            .expect("the example html should contain an entry");
        MenuItem::from_html_element(entry)
    }

    #[test]
    fn test_well_formed_entry() {
        let html =
            std::fs::read_to_string("./src/parse/html_examples/menu_entry.html").unwrap();
        let item = only_item(&html);
        assert_eq!(item.time, "1150");
        assert_eq!(item.category, "Lunch");
        assert_eq!(item.menu_name, "Bibimbap");
        assert_eq!(item.price, "6,500");
        assert_eq!(item.calories, "450kcal");
        // calorie substring gone, separator token glued out, lines joined
        assert_eq!(item.detail, "Braised pork, Steamed riceSeaweed soup");
    }

    #[test]
    fn test_missing_time_input_falls_back_to_unknown() {
        let item = only_item(
            r#"<ul><li class="more">
                <div class="label">Dinner</div>
                <h4 class="tit"><span class="tit">Curry</span></h4>
            </li></ul>"#,
        );
        assert_eq!(item.time, "unknown");
        assert_eq!(item.category, "Dinner");
    }

    #[test]
    fn test_time_input_without_value_attr_falls_back_to_unknown() {
        let item = only_item(r#"<ul><li class="more"><input id="sc3"></li></ul>"#);
        assert_eq!(item.time, "unknown");
    }

    #[test]
    fn test_missing_title_block_blanks_name_and_price() {
        let item = only_item(
            r#"<ul><li class="more">
                <input id="sc1" value="0730">
                <div class="label">Breakfast</div>
            </li></ul>"#,
        );
        assert_eq!(item.menu_name, "");
        assert_eq!(item.price, "");
        assert_eq!(item.time, "0730");
    }

    #[test]
    fn test_missing_price_span_only_blanks_price() {
        let item = only_item(
            r#"<ul><li class="more">
                <h4 class="tit"><span class="tit">Ramen</span></h4>
            </li></ul>"#,
        );
        assert_eq!(item.menu_name, "Ramen");
        assert_eq!(item.price, "");
    }

    #[test]
    fn test_missing_detail_block_blanks_calories_and_detail() {
        let item = only_item(
            r#"<ul><li class="more">
                <h4 class="tit"><span class="tit">Udon</span><span class="price">5,000</span></h4>
            </li></ul>"#,
        );
        assert_eq!(item.calories, "");
        assert_eq!(item.detail, "");
    }

    #[test]
    fn test_detail_without_calorie_span() {
        let item = only_item(
            r#"<ul><li class="more">
                <p class="dtl">Rice<br>Soup</p>
            </li></ul>"#,
        );
        assert_eq!(item.calories, "");
        assert_eq!(item.detail, "Rice, Soup");
    }

    #[test]
    fn test_clean_detail_order_of_operations() {
        assert_eq!(
            clean_detail("450kcal\n쌀밥 · 미역국\n깍두기", "450kcal"),
            "쌀밥미역국, 깍두기"
        );
        // empty calorie text must not touch the rest
        assert_eq!(clean_detail("Rice\nSoup", ""), "Rice, Soup");
        // token is a literal: a bare middle dot without both spaces survives
        assert_eq!(clean_detail("Rice ·Soup", ""), "Rice ·Soup");
    }

    #[test]
    fn test_every_field_serializes_even_when_fallback() {
        let item = only_item(r#"<ul><li class="more"></li></ul>"#);
        let value = serde_json::to_value(&item).unwrap();
        for key in ["time", "category", "menu_name", "price", "calories", "detail"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["time"], "unknown");
        assert_eq!(value["menu_name"], "");
    }

    #[test]
    fn test_entries_keep_document_order() {
        let html = std::fs::read_to_string("./src/parse/html_examples/menu_page.html").unwrap();
        let items = menu_items(&html);
        assert_eq!(items.len(), 3);
        let categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(categories, ["조식", "중식", "석식"]);
    }
}
