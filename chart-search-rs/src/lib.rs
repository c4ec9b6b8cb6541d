//! Clients for the three services a song dataset is assembled from:
//! the Billboard Hot 100 chart pages, the Spotify Web API (search and audio
//! features) and the Genius API plus its lyric pages.
//!
//! Every client issues plain unary requests; nothing here retries.

pub mod billboard;
pub mod config;
pub mod error;
pub mod genius;
mod http;
pub mod models;
pub mod spotify;

pub use billboard::{parse_chart, BillboardChartApi};
pub use config::{Credentials, ServiceEndpoints};
pub use error::{ChartSearchError, Result};
pub use genius::{parse_lyrics_page, GeniusApi};
pub use models::*;
pub use spotify::SpotifyApi;
