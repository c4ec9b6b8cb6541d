use super::models::SearchEnvelope;
use crate::config::{Credentials, ServiceEndpoints};
use crate::error::{ChartSearchError, Result};
use crate::http::read_json;
use crate::models::ChartEntry;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

const LYRICS_CONTAINER_SELECTOR: &str = r#"div[data-lyrics-container="true"]"#;

pub struct GeniusApi {
    client: Client,
    api_url: String,
    token: String,
}

impl GeniusApi {
    pub fn new(endpoints: &ServiceEndpoints, credentials: &Credentials) -> Result<Self> {
        info!("Initializing Genius API client");
        Ok(Self {
            client: endpoints.http_client()?,
            api_url: endpoints.genius_api.clone(),
            token: credentials.genius_token.clone(),
        })
    }

    /// Page URL of the first search hit for `"<title> <artist>"`.
    #[instrument(skip(self), fields(service = "genius"))]
    pub async fn search_song_url(&self, entry: &ChartEntry) -> Result<String> {
        let url = format!("{}/search", self.api_url);
        let query = entry.search_query();
        debug!("GET request to: {} (q = {})", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("q", query.as_str())])
            .send()
            .await?;

        let envelope: SearchEnvelope = read_json(response, "search").await?;
        match envelope.response.hits.into_iter().next() {
            Some(hit) => {
                debug!("Matched '{}' to {}", query, hit.result.url);
                Ok(hit.result.url)
            }
            None => {
                warn!("No Genius hit for '{}'", query);
                Err(ChartSearchError::NotFound(format!("lyrics page for '{}'", query)))
            }
        }
    }

    /// Download a lyric page and extract its text.
    #[instrument(skip(self), fields(service = "genius"))]
    pub async fn get_lyrics(&self, page_url: &str) -> Result<String> {
        debug!("GET request to: {}", page_url);
        let response = self.client.get(page_url).send().await?;
        let html = response.text().await?;
        debug!("Lyric page received, length: {} bytes", html.len());

        let lyrics = parse_lyrics_page(&html)?;
        info!("Extracted {} lines of lyrics", lyrics.lines().count());
        Ok(lyrics)
    }
}

/// Text of the first lyric container on a page, one text node per line.
pub fn parse_lyrics_page(html: &str) -> Result<String> {
    let selector = Selector::parse(LYRICS_CONTAINER_SELECTOR).map_err(|e| {
        ChartSearchError::HtmlParse(format!(
            "Invalid selector '{}': {:?}",
            LYRICS_CONTAINER_SELECTOR, e
        ))
    })?;

    let document = Html::parse_document(html);
    let container = document.select(&selector).next().ok_or_else(|| {
        ChartSearchError::HtmlParse(format!(
            "No element matching '{}'",
            LYRICS_CONTAINER_SELECTOR
        ))
    })?;

    Ok(container.text().collect::<Vec<_>>().join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lyrics_page_joins_text_nodes() {
        let html = r#"
            <html><body>
              <div data-lyrics-container="true" class="Lyrics__Container">[Verse 1]<br/>I came my way<br/><a href="/annotation"><span>I'm a mess</span></a><br/>Don't you stay</div>
              <div data-lyrics-container="true">[Chorus]<br/>Second block</div>
            </body></html>
        "#;

        let lyrics = parse_lyrics_page(html).unwrap();
        assert_eq!(lyrics, "[Verse 1]\nI came my way\nI'm a mess\nDon't you stay");
    }

    #[test]
    fn test_parse_lyrics_page_without_container() {
        let result = parse_lyrics_page("<html><body><div class=\"Lyrics\">x</div></body></html>");
        assert!(matches!(result, Err(ChartSearchError::HtmlParse(_))));
    }

    #[test]
    fn test_search_envelope_hits() {
        let payload = r#"{
            "meta": {"status": 200},
            "response": {
                "hits": [
                    {
                        "type": "song",
                        "result": {
                            "url": "https://genius.com/Dua-lipa-houdini-lyrics",
                            "title": "Houdini",
                            "full_title": "Houdini by Dua Lipa",
                            "primary_artist": {"name": "Dua Lipa"}
                        }
                    }
                ]
            }
        }"#;
        let envelope: SearchEnvelope = serde_json::from_str(payload).unwrap();
        let hit = &envelope.response.hits[0];
        assert_eq!(hit.kind, "song");
        assert_eq!(hit.result.url, "https://genius.com/Dua-lipa-houdini-lyrics");
        assert_eq!(hit.result.primary_artist.as_ref().unwrap().name, "Dua Lipa");
    }
}
