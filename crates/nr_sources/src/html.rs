use scraper::Html;

/// Visible text of an HTML fragment with runs of whitespace collapsed.
pub fn to_plain_text(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&text)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markup() {
        let html = r##"<a href="https://example.com/a">Chip maker beats estimates</a>&nbsp;&nbsp;<font color="#6f6f6f">Reuters</font>"##;
        assert_eq!(to_plain_text(html), "Chip maker beats estimates Reuters");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(to_plain_text("Shares rose   5% \n on Monday"), "Shares rose 5% on Monday");
        assert_eq!(to_plain_text(""), "");
    }
}
