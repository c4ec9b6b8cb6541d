mod api;
pub mod models;

pub use api::{parse_lyrics_page, GeniusApi};
