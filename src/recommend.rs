//! Preference filtering and random pick

use crate::classify::{ClassifiedSong, Level};
use clap::ValueEnum;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

const TRACK_URL_BASE: &str = "https://open.spotify.com/track/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl From<Difficulty> for Level {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Easy => Level::Low,
            Difficulty::Medium => Level::Medium,
            Difficulty::Hard => Level::High,
        }
    }
}

/// Desired valence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mood {
    Negative,
    Neutral,
    Positive,
}

impl From<Mood> for Level {
    fn from(value: Mood) -> Self {
        match value {
            Mood::Negative => Level::Low,
            Mood::Neutral => Level::Medium,
            Mood::Positive => Level::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub difficulty: Difficulty,
    pub danceability: Level,
    pub mood: Mood,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no song matches the requested preferences")]
pub struct EmptyCandidateSet;

/// Rows matching all three preferences, in table order.
pub fn filter<'a>(table: &'a [ClassifiedSong], prefs: &Preferences) -> Vec<&'a ClassifiedSong> {
    let difficulty = Level::from(prefs.difficulty);
    let valence = Level::from(prefs.mood);

    table
        .iter()
        .filter(|row| {
            row.difficulty == difficulty
                && row.danceability_level == prefs.danceability
                && row.valence_level == valence
        })
        .collect()
}

/// Pick one candidate uniformly at random.
pub fn choose<'a, R: Rng + ?Sized>(
    candidates: &[&'a ClassifiedSong],
    rng: &mut R,
) -> Result<&'a ClassifiedSong, EmptyCandidateSet> {
    candidates.choose(rng).copied().ok_or(EmptyCandidateSet)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub track_url: String,
}

impl From<&ClassifiedSong> for Recommendation {
    fn from(row: &ClassifiedSong) -> Self {
        Self {
            id: row.song.id.clone(),
            title: row.song.title.clone(),
            artist: row.song.artist.clone(),
            lyrics: row.song.lyrics.clone(),
            track_url: format!("{}{}", TRACK_URL_BASE, row.song.id),
        }
    }
}

/// Filter then choose.
pub fn recommend<R: Rng + ?Sized>(
    table: &[ClassifiedSong],
    prefs: &Preferences,
    rng: &mut R,
) -> Result<Recommendation, EmptyCandidateSet> {
    let candidates = filter(table, prefs);
    tracing::debug!("{} candidates for {:?}", candidates.len(), prefs);
    choose(&candidates, rng).map(Recommendation::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::tests::song;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn row(id: &str, difficulty: Level, danceability: Level, valence: Level) -> ClassifiedSong {
        ClassifiedSong {
            song: song(id, [0.5; 7]),
            danceability_level: danceability,
            valence_level: valence,
            difficulty_score: 8,
            difficulty,
        }
    }

    fn prefs(difficulty: Difficulty, danceability: Level, mood: Mood) -> Preferences {
        Preferences {
            difficulty,
            danceability,
            mood,
        }
    }

    #[test]
    fn test_filter_matches_all_three() {
        let table = vec![
            row("a", Level::Low, Level::Low, Level::Low),
            row("b", Level::Low, Level::High, Level::Low),
            row("c", Level::Low, Level::Low, Level::Low),
            row("d", Level::High, Level::Low, Level::Low),
        ];
        let ids: Vec<&str> = filter(&table, &prefs(Difficulty::Easy, Level::Low, Mood::Negative))
            .iter()
            .map(|r| r.song.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_choose_empty_is_error() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose(&[], &mut rng), Err(EmptyCandidateSet));
    }

    #[test]
    fn test_recommend_builds_track_url() {
        let table = vec![row("4uLU6hMCjMI75M1A2tKUQC", Level::Medium, Level::High, Level::High)];
        let mut rng = StdRng::seed_from_u64(1);
        let pick = recommend(
            &table,
            &prefs(Difficulty::Medium, Level::High, Mood::Positive),
            &mut rng,
        )
        .unwrap();
        assert_eq!(
            pick.track_url,
            "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"
        );
        assert_eq!(pick.title, "Title 4uLU6hMCjMI75M1A2tKUQC");
    }

    #[test]
    fn test_recommend_no_match() {
        let table = vec![row("a", Level::High, Level::High, Level::High)];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            recommend(&table, &prefs(Difficulty::Easy, Level::Low, Mood::Neutral), &mut rng),
            Err(EmptyCandidateSet)
        );
    }
}
