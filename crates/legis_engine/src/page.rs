use legis_core::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::ScrapeError;

/// A parsed document plus the URL it was fetched from.
///
/// Not `Send`: parse, extract owned values, and drop it before awaiting.
pub struct Page {
    url: String,
    base: Option<Url>,
    doc: Html,
}

impl Page {
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            base: Url::parse(url).ok(),
            doc: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
        let selector = selector(css)?;
        Ok(self.doc.select(&selector).collect())
    }

    /// Collapsed text of the first match, if it has any.
    pub fn first_text(&self, css: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self
            .select(css)?
            .into_iter()
            .map(element_text)
            .find(|text| !text.is_empty()))
    }

    /// Like [`Page::first_text`], but a missing element is a malformed page.
    pub fn require_text(&self, css: &str) -> Result<String, ScrapeError> {
        self.first_text(css)?
            .ok_or_else(|| ScrapeError::malformed(&self.url, css))
    }

    /// Absolute `href`s of the matching anchors.
    pub fn links(&self, css: &str) -> Result<Vec<String>, ScrapeError> {
        Ok(self
            .select(css)?
            .into_iter()
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| resolve_url(href, self.base.as_ref()))
            .map(String::from)
            .collect())
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// All descendant text, whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Text nodes that are direct children of `element`, in order, skipping blanks.
pub(crate) fn own_texts(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| collapse_whitespace(t)))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Cells of a row as collapsed text.
pub(crate) fn cells(row: ElementRef<'_>, css: &str) -> Result<Vec<String>, ScrapeError> {
    let selector = selector(css)?;
    Ok(row.select(&selector).map(element_text).collect())
}

fn resolve_url(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") || lower.starts_with("mailto:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}

#[cfg(test)]
mod tests {
    use super::{own_texts, Page};

    #[test]
    fn links_are_made_absolute() {
        let page = Page::parse(
            "https://example.gov/house/list.asp",
            r##"<a href="h.asp?id=1">one</a><a href="#top">top</a><a href="https://other.gov/x">x</a>"##,
        );
        assert_eq!(
            page.links("a").unwrap(),
            vec![
                "https://example.gov/house/h.asp?id=1".to_string(),
                "https://other.gov/x".to_string(),
            ]
        );
    }

    #[test]
    fn own_text_skips_nested_elements() {
        let page = Page::parse(
            "https://example.gov/",
            "<h2><span>AB-1</span>\n  An act relating to water. </h2>",
        );
        let h2 = page.select("h2").unwrap()[0];
        assert_eq!(own_texts(h2), vec!["An act relating to water.".to_string()]);
    }

    #[test]
    fn missing_element_is_malformed() {
        let page = Page::parse("https://example.gov/", "<p>nothing</p>");
        let err = page.require_text("span#measureNum").unwrap_err();
        assert_eq!(err.to_string(), "https://example.gov/: expected span#measureNum");
    }
}
