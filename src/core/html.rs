// src/core/html.rs
//! Thin helpers over `scraper` for the vendor specs.
//! Selectors are compiled per call; pages are small and scraped once.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;
use crate::error::{Error, Result};

pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

pub fn parse_fragment(html: &str) -> Html {
    Html::parse_fragment(html)
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::parse(css, format!("bad selector: {e:?}")))
}

/// First descendant of `scope` matching `css`. `scope` itself never matches.
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    Ok(select_all(scope, css)?.into_iter().next())
}

pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).filter(|el| el.id() != scope.id()).collect())
}

/// Like [`select_first`], but a missing element is a parse error against `doc`.
pub fn require<'a>(scope: ElementRef<'a>, css: &str, doc: &str) -> Result<ElementRef<'a>> {
    select_first(scope, css)?.ok_or_else(|| Error::parse(doc, format!("'{css}' not found")))
}

/// Visible text of an element, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Hex colour following the first `#` in an inline style,
/// e.g. `background:#a1b2c3;` → `a1b2c3`.
pub fn style_hex(style: &str) -> Option<&str> {
    let (_, rest) = style.split_once('#')?;
    let end = rest.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(rest.len());
    Some(&rest[..end]).filter(|h| !h.is_empty())
}

/// Every `<tr>` of a table as trimmed `<td>` texts.
pub fn table_cells(table: ElementRef<'_>) -> Result<Vec<Vec<String>>> {
    let td = selector("td")?;
    Ok(select_all(table, "tr")?
        .into_iter()
        .map(|tr| tr.select(&td).map(text_of).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_hex_variants() {
        assert_eq!(style_hex("background:#A1b2C3;"), Some("A1b2C3"));
        assert_eq!(style_hex("background-color: #ffffff"), Some("ffffff"));
        assert_eq!(style_hex("color: red"), None);
    }

    #[test]
    fn table_cells_keeps_row_shape() {
        let doc = parse_document(
            "<table><tr><td> Brand </td><td>Roscolux</td></tr><tr><td>a</td><td>b</td><td>c</td></tr></table>",
        );
        let table = require(doc.root_element(), "table", "t").unwrap();
        let cells = table_cells(table).unwrap();
        assert_eq!(cells, vec![vec!["Brand", "Roscolux"], vec!["a", "b", "c"]]);
    }

    #[test]
    fn scope_is_not_its_own_descendant() {
        let doc = parse_document("<ul><li class=\"outer\"><ul><li>a</li><li>b</li></ul></li></ul>");
        let outer = require(doc.root_element(), "li.outer", "t").unwrap();
        let inner: Vec<String> = select_all(outer, "li").unwrap().into_iter().map(text_of).collect();
        assert_eq!(inner, vec!["a", "b"]);
    }

    #[test]
    fn missing_element_names_document() {
        let doc = parse_document("<p>hi</p>");
        let err = require(doc.root_element(), "h1", "L999").unwrap_err();
        assert!(err.to_string().contains("L999"));
    }
}
