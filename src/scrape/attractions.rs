//! Must-see attractions per state
//!
//! The page lists each state as an `h2` heading followed by one or more `ul`
//! lists of attractions, all inside the article's `div.entry-content`.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::ScrapeDataset;

static CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.entry-content").expect("valid selector"));
static HEADINGS_AND_LISTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, ul").expect("valid selector"));
static ITEMS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").expect("valid selector"));

/// One list of attractions under a state heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionEntry {
    /// Heading text as scraped, not normalized to a state name
    pub state: String,
    /// List items joined with `"; "`
    pub attractions: String,
}

/// Attractions table
#[derive(Debug)]
pub struct Attractions;

impl ScrapeDataset for Attractions {
    type Row = AttractionEntry;

    const KIND: &'static str = "attractions";
    const CACHE_FILE: &'static str = "state_attractions_cache.csv";

    fn extract(html: &str) -> Vec<AttractionEntry> {
        let document = Html::parse_document(html);
        let Some(content) = document.select(&CONTENT).next() else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        let mut current_state: Option<String> = None;

        for element in content.select(&HEADINGS_AND_LISTS) {
            match element.value().name() {
                "h2" => {
                    current_state = Some(stripped_text(element)).filter(|s| !s.is_empty());
                }
                "ul" => {
                    // Lists before the first heading, or under a blank one, belong to no state
                    let Some(state) = &current_state else {
                        continue;
                    };
                    let items: Vec<String> = element.select(&ITEMS).map(stripped_text).collect();
                    entries.push(AttractionEntry {
                        state: state.clone(),
                        attractions: items.join("; "),
                    });
                }
                _ => {}
            }
        }

        entries
    }

    fn key(row: &AttractionEntry) -> &str {
        &row.state
    }
}

/// Concatenation of the element's trimmed text fragments
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::ScrapedDataset;

    const PAGE: &str = r#"
        <html><body>
          <h2>Not in content</h2>
          <ul><li>Ignored</li></ul>
          <div class="entry-content">
            <ul><li>Intro list</li></ul>
            <h2>1. <strong>Alabama</strong></h2>
            <p>Sweet home.</p>
            <ul>
              <li>U.S. Space &amp; Rocket Center</li>
              <li> Gulf Shores </li>
            </ul>
            <h2>North Carolina</h2>
            <ul><li>Blue Ridge Parkway</li></ul>
            <ul><li>Outer Banks</li></ul>
            <h2>South Carolina</h2>
            <ul><li>Charleston</li></ul>
          </div>
        </body></html>"#;

    #[test]
    fn test_extracts_state_lists_in_order() {
        let rows = Attractions::extract(PAGE);
        assert_eq!(
            rows,
            vec![
                AttractionEntry {
                    state: "1.Alabama".to_string(),
                    attractions: "U.S. Space & Rocket Center; Gulf Shores".to_string(),
                },
                AttractionEntry {
                    state: "North Carolina".to_string(),
                    attractions: "Blue Ridge Parkway".to_string(),
                },
                AttractionEntry {
                    state: "North Carolina".to_string(),
                    attractions: "Outer Banks".to_string(),
                },
                AttractionEntry {
                    state: "South Carolina".to_string(),
                    attractions: "Charleston".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_blank_heading_drops_following_lists() {
        let page = r#"
            <div class="entry-content">
              <h2>Utah</h2><ul><li>Arches</li></ul>
              <h2> </h2><ul><li>Orphan</li></ul>
              <h2>Vermont</h2><ul><li>Stowe</li></ul>
            </div>"#;
        let rows = Attractions::extract(page);

        let states: Vec<&str> = rows.iter().map(|row| row.state.as_str()).collect();
        assert_eq!(states, vec!["Utah", "Vermont"]);
        assert!(rows.iter().all(|row| row.attractions != "Orphan"));
    }

    #[test]
    fn test_missing_content_region_yields_nothing() {
        let page = "<html><h2>Texas</h2><ul><li>Alamo</li></ul></html>";
        assert!(Attractions::extract(page).is_empty());
    }

    #[test]
    fn test_fuzzy_lookup_by_state() {
        let dataset = ScrapedDataset::new(Attractions::extract(PAGE));

        let alabama = dataset.find("alabama", Attractions::key).unwrap();
        assert!(alabama.attractions.contains("Gulf Shores"));

        // "Carolina" matches both Carolinas; page order decides
        let carolina = dataset.find("Carolina", Attractions::key).unwrap();
        assert_eq!(carolina.state, "North Carolina");

        assert!(dataset.find("Texas", Attractions::key).is_none());
    }
}
