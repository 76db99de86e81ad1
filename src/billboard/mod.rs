//! # Billboard Chart Module
//!
//! Fetches the Hot 100 page for a given week and turns its rows into ranked
//! [`ChartEntry`] values.
//!
//! Every chart row lives in a `div.o-chart-results-list-row-container`. Inside
//! a row the song title is the `h3#title-of-a-story` heading and the artist
//! credit is the `span.a-font-primary-s` element. A row missing either element
//! is kept with [`utils::NOT_FOUND`] in place of the missing text, so a single
//! odd row never fails the whole chart.

mod date;

pub use date::{BadDate, ChartDate};

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::{Res, config::ChartSettings, info, types::ChartEntry, utils, warning};

const ROW_SELECTOR: &str = "div.o-chart-results-list-row-container";
const TITLE_SELECTOR: &str = "h3#title-of-a-story";
const ARTIST_SELECTOR: &str = "span.a-font-primary-s";

/// Client for the public chart pages.
#[derive(Debug, Clone)]
pub struct ChartClient {
    http: Client,
    chart_url: String,
}

impl ChartClient {
    pub fn new(http: Client, settings: &ChartSettings) -> Self {
        Self {
            http,
            chart_url: settings.chart_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the chart page for `date`.
    pub fn chart_url(&self, date: &ChartDate) -> String {
        format!("{}/{}", self.chart_url, date.chart_path())
    }

    /// Downloads and parses the chart for `date`.
    ///
    /// # Errors
    ///
    /// Network failures and non-success responses are returned as errors. A
    /// page without any chart rows is not an error, it yields an empty chart.
    pub async fn fetch(&self, date: &ChartDate) -> Res<Vec<ChartEntry>> {
        let url = self.chart_url(date);
        info!("Fetching chart {}", url);

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let entries = parse_chart(&body)?;
        if entries.is_empty() {
            warning!("No chart rows found for {}", date);
        } else {
            info!("Fetched {} chart entries for {}", entries.len(), date);
        }
        Ok(entries)
    }
}

/// Parses a chart page into entries ranked by their position on the page.
pub fn parse_chart(html: &str) -> Res<Vec<ChartEntry>> {
    let rows = selector(ROW_SELECTOR)?;
    let title = selector(TITLE_SELECTOR)?;
    let artist = selector(ARTIST_SELECTOR)?;

    let document = Html::parse_document(html);
    let entries = document
        .select(&rows)
        .enumerate()
        .map(|(index, row)| {
            ChartEntry::new(
                index as u32 + 1,
                first_text(row, &title),
                first_text(row, &artist),
            )
        })
        .collect();
    Ok(entries)
}

fn first_text(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| utils::NOT_FOUND.to_string())
}

fn selector(css: &str) -> Res<Selector> {
    Selector::parse(css).map_err(|e| format!("invalid selector {}: {}", css, e).into())
}
