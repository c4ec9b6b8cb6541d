//! Percentile-based difficulty classification
//!
//! Levels are recomputed on every load from the tertile cut-points of the
//! table at hand; nothing here is persisted.

use crate::export::ExportedSong;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Quantiles used as bin edges: minimum, two tertiles, maximum.
pub const TERTILES: [f64; 4] = [0.0, 0.33, 0.66, 1.0];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("cannot classify an empty dataset")]
    EmptyDataset,
    #[error("value at row {0} is not a number")]
    NotANumber(usize),
    #[error("value {value} at row {index} lies outside [{low}, {high}]")]
    OutOfRange {
        index: usize,
        value: f64,
        low: f64,
        high: f64,
    },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// 1, 2 or 3.
    pub fn score(self) -> u8 {
        match self {
            Level::Low => 1,
            Level::Medium => 2,
            Level::High => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        };
        f.write_str(name)
    }
}

/// Quantile `q` of `sorted` with linear interpolation between neighbours.
///
/// `sorted` must be non-empty and ascending.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Bin edges at [`TERTILES`] of `values`.
pub fn tertile_cutpoints(values: &[f64]) -> Result<[f64; 4], ClassifyError> {
    if values.is_empty() {
        return Err(ClassifyError::EmptyDataset);
    }
    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(ClassifyError::NotANumber(index));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(TERTILES.map(|q| quantile(&sorted, q)))
}

/// Label every value with the bin containing it.
///
/// Bins are `[c0, c1]`, `(c1, c2]` and `(c2, c3]`; when edges coincide the
/// first matching bin wins.
pub fn bucket<L: Copy>(
    values: &[f64],
    cutpoints: [f64; 4],
    labels: [L; 3],
) -> Result<Vec<L>, ClassifyError> {
    let [low, first, second, high] = cutpoints;

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value.is_nan() {
                return Err(ClassifyError::NotANumber(index));
            }
            if value < low || value > high {
                return Err(ClassifyError::OutOfRange {
                    index,
                    value,
                    low,
                    high,
                });
            }
            Ok(if value <= first {
                labels[0]
            } else if value <= second {
                labels[1]
            } else {
                labels[2]
            })
        })
        .collect()
}

/// Tertile levels of `values` against their own distribution.
pub fn tertile_levels(values: &[f64]) -> Result<Vec<Level>, ClassifyError> {
    bucket(values, tertile_cutpoints(values)?, Level::ALL)
}

/// An exported song with its derived levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedSong {
    #[serde(flatten)]
    pub song: ExportedSong,
    pub danceability_level: Level,
    pub valence_level: Level,
    /// Sum of the speechiness, reading-ease, vocabulary and syllable levels.
    pub difficulty_score: u8,
    pub difficulty: Level,
}

/// Classify the whole table.
pub fn classify(songs: Vec<ExportedSong>) -> Result<Vec<ClassifiedSong>, ClassifyError> {
    if songs.is_empty() {
        return Err(ClassifyError::EmptyDataset);
    }

    let column = |f: fn(&ExportedSong) -> f64| songs.iter().map(f).collect::<Vec<f64>>();

    let danceability = tertile_levels(&column(|s| s.danceability))?;
    let valence = tertile_levels(&column(|s| s.valence))?;
    let speechiness = tertile_levels(&column(|s| s.speechiness))?;
    let fres = tertile_levels(&column(|s| s.fres))?;
    let vocab = tertile_levels(&column(|s| s.vocab_complex))?;
    let syllables = tertile_levels(&column(|s| s.avg_syllable))?;

    let scores: Vec<u8> = (0..songs.len())
        .map(|i| speechiness[i].score() + fres[i].score() + vocab[i].score() + syllables[i].score())
        .collect();
    let score_values: Vec<f64> = scores.iter().map(|&s| f64::from(s)).collect();
    let difficulty = tertile_levels(&score_values)?;

    tracing::debug!("Classified {} songs", songs.len());

    Ok(songs
        .into_iter()
        .enumerate()
        .map(|(i, song)| ClassifiedSong {
            song,
            danceability_level: danceability[i],
            valence_level: valence[i],
            difficulty_score: scores[i],
            difficulty: difficulty[i],
        })
        .collect())
}
