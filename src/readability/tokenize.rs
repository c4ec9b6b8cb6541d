//! Word and sentence tokenizers
//!
//! Treebank-flavoured word splitting (punctuation and clitics such as `n't`,
//! `'s`, `'ll` become their own tokens) and punctuation-driven sentence
//! splitting. Line breaks alone never end a sentence.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:[-'’]\w+)*|\.\.\.|[^\w\s]").unwrap());

const CLITICS: [&str; 6] = ["'s", "'m", "'d", "'ll", "'re", "'ve"];

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 6] = ['"', '\'', ')', ']', '”', '’'];

/// Split text into word and punctuation tokens.
pub fn word_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in TOKEN.find_iter(text) {
        let (stem, clitic) = split_clitic(m.as_str());
        tokens.push(stem.to_string());
        if let Some(clitic) = clitic {
            tokens.push(clitic.to_string());
        }
    }
    tokens
}

fn split_clitic(token: &str) -> (&str, Option<&str>) {
    let len = token.len();
    if len > 3 && token.is_char_boundary(len - 3) && token[len - 3..].eq_ignore_ascii_case("n't") {
        return (&token[..len - 3], Some(&token[len - 3..]));
    }
    if let Some(pos) = token.rfind('\'') {
        let suffix = &token[pos..];
        if pos > 0 && CLITICS.iter().any(|c| suffix.eq_ignore_ascii_case(c)) {
            return (&token[..pos], Some(suffix));
        }
    }
    (token, None)
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
///
/// Trailing text without a terminator is a sentence of its own.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !TERMINATORS.contains(&c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let at_break = chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
        if at_break {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}
