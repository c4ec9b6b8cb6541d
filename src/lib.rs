//! Lyric Tutor - English songs for language learners
//!
//! Builds a song dataset from weekly Hot 100 charts, Spotify audio features
//! and Genius lyrics, scores each song's lyrics for readability, recommends a
//! song by difficulty, danceability and mood, and runs a Q&A session over the
//! chosen lyrics.

pub mod chat;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod enrich;
pub mod export;
pub mod language;
pub mod pipeline;
pub mod readability;
pub mod recommend;
pub mod sources;
pub mod updater;
