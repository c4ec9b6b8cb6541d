use crate::config::ServiceEndpoints;
use crate::error::{ChartSearchError, Result};
use crate::models::ChartEntry;
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

const ROW_SELECTOR: &str = "ul.o-chart-results-list-row";
const TITLE_SELECTOR: &str = "h3";
const ARTIST_SELECTOR: &str = "span.a-font-primary-s";

pub struct BillboardChartApi {
    client: Client,
    base_url: String,
}

impl BillboardChartApi {
    pub fn new(endpoints: &ServiceEndpoints) -> Result<Self> {
        info!("Initializing Billboard chart client");
        Ok(Self {
            client: endpoints.http_client()?,
            base_url: endpoints.billboard.clone(),
        })
    }

    /// Fetch the Hot 100 listing published for `date`, in page order.
    ///
    /// The page is parsed whatever the HTTP status is; an error page simply
    /// yields no entries.
    #[instrument(skip(self), fields(service = "billboard"))]
    pub async fn get_chart(&self, date: NaiveDate) -> Result<Vec<ChartEntry>> {
        let url = chart_url(&self.base_url, date);
        debug!("GET request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let html = response.text().await?;
        debug!("Response received ({}), length: {} bytes", status, html.len());

        let entries = parse_chart(&html)?;
        if entries.is_empty() {
            warn!("Chart page for {} listed no entries (status {})", date, status);
        } else {
            info!("Chart for {} has {} entries", date, entries.len());
        }
        Ok(entries)
    }
}

/// `{base}/charts/hot-100/{YYYY-MM-DD}/`
pub fn chart_url(base_url: &str, date: NaiveDate) -> String {
    format!("{}/charts/hot-100/{}/", base_url, date.format("%Y-%m-%d"))
}

/// Extract `(title, artist)` pairs from a chart page.
///
/// Rows missing either the title heading or the artist span are skipped.
pub fn parse_chart(html: &str) -> Result<Vec<ChartEntry>> {
    let row_selector = selector(ROW_SELECTOR)?;
    let title_selector = selector(TITLE_SELECTOR)?;
    let artist_selector = selector(ARTIST_SELECTOR)?;

    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for row in document.select(&row_selector) {
        let title = row
            .select(&title_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string());
        let artist = row
            .select(&artist_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string());

        match (title, artist) {
            (Some(title), Some(artist)) => entries.push(ChartEntry { title, artist }),
            _ => debug!("Skipping chart row without title or artist"),
        }
    }

    Ok(entries)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ChartSearchError::HtmlParse(format!("Invalid selector '{}': {:?}", css, e)))
}
