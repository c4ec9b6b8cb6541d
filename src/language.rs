//! Statistical language guess for lyric text.

/// ISO 639-3 code of the most likely language, `None` when the text carries
/// too little signal to guess.
pub fn detect_language(text: &str) -> Option<&'static str> {
    whatlang::detect(text).map(|info| info.lang().code())
}
