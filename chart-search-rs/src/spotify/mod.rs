mod api;
pub mod models;

pub use api::SpotifyApi;
