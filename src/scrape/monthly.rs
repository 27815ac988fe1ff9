//! Month-by-month travel recommendations
//!
//! Every `h2` on the guide page names a month; the first paragraph after it
//! holds the advice.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::ScrapeDataset;

static HEADINGS_AND_PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, p").expect("valid selector"));

/// Advice for one month heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecommendation {
    pub month: String,
    /// `None` when no paragraph follows the heading, or that paragraph is blank
    pub recommendations: Option<String>,
}

/// Monthly recommendations table
#[derive(Debug)]
pub struct MonthlyRecommendations;

impl ScrapeDataset for MonthlyRecommendations {
    type Row = MonthlyRecommendation;

    const KIND: &'static str = "monthly recommendations";
    const CACHE_FILE: &'static str = "monthly_recommendations_cache.csv";

    fn extract(html: &str) -> Vec<MonthlyRecommendation> {
        let document = Html::parse_document(html);

        let mut rows: Vec<MonthlyRecommendation> = Vec::new();
        // Headings still waiting for their first following paragraph
        let mut pending = 0usize;

        for element in document.select(&HEADINGS_AND_PARAGRAPHS) {
            match element.value().name() {
                "h2" => {
                    rows.push(MonthlyRecommendation {
                        month: trimmed_text(element),
                        recommendations: None,
                    });
                    pending += 1;
                }
                "p" if pending > 0 => {
                    // A blank paragraph still ends the wait, but carries no advice
                    let text = Some(trimmed_text(element)).filter(|t| !t.is_empty());
                    let start = rows.len() - pending;
                    for row in &mut rows[start..] {
                        row.recommendations = text.clone();
                    }
                    pending = 0;
                }
                _ => {}
            }
        }

        rows
    }

    fn key(row: &MonthlyRecommendation) -> &str {
        &row.month
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::ScrapedDataset;

    const PAGE: &str = r"
        <html><body>
          <p>Intro paragraph before any month.</p>
          <h2> January </h2>
          <div><p>Head to <b>Colorado</b> for skiing.</p></div>
          <p>Second January paragraph.</p>
          <h2>Table of contents</h2>
          <h2>March</h2>
          <p>Spring break in Florida.</p>
          <h2>Final thoughts</h2>
        </body></html>";

    #[test]
    fn test_each_heading_takes_next_paragraph() {
        let rows = MonthlyRecommendations::extract(PAGE);
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].month, "January");
        assert_eq!(
            rows[0].recommendations.as_deref(),
            Some("Head to Colorado for skiing.")
        );

        // Consecutive headings share the next paragraph
        assert_eq!(rows[1].month, "Table of contents");
        assert_eq!(rows[1].recommendations.as_deref(), Some("Spring break in Florida."));
        assert_eq!(rows[2].recommendations.as_deref(), Some("Spring break in Florida."));

        assert_eq!(rows[3].month, "Final thoughts");
        assert_eq!(rows[3].recommendations, None);
    }

    #[test]
    fn test_blank_paragraph_is_absent() {
        let rows = MonthlyRecommendations::extract("<h2>July</h2><p>  </p><p>Later text.</p>");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, "July");
        assert_eq!(rows[0].recommendations, None);
    }

    #[test]
    fn test_page_without_headings_is_empty() {
        assert!(MonthlyRecommendations::extract("<p>just text</p>").is_empty());
    }

    #[test]
    fn test_month_lookup() {
        let dataset = ScrapedDataset::new(MonthlyRecommendations::extract(PAGE));
        let march = dataset.find("march", MonthlyRecommendations::key).unwrap();
        assert_eq!(march.recommendations.as_deref(), Some("Spring break in Florida."));
        assert!(dataset.find("December", MonthlyRecommendations::key).is_none());
    }
}
