//! Word tokenizer for lexical sentiment analysis.

use super::lexicon::Lexicon;

/// Characters split off the start and end of a word as standalone tokens
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '`', '\'', '"', '@', '#', '$',
    '^', '&', '*', '+', '-', '|', '=', '~', '_', '/', '\\', '<', '>', '%',
];

/// Sarcasm marker, kept intact
pub const IRONY_MARKER: &str = "(!)";

const NEGATION_CLITIC: &str = "n't";

fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Split text into lowercase tokens.
///
/// Whole whitespace-delimited tokens that are emoticons (or the irony marker)
/// are kept as-is. Otherwise leading and trailing punctuation is emitted one
/// character per token and a trailing `n't` is split from its stem.
pub fn tokenize(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut tokens = Vec::new();

    for chunk in text.split_whitespace() {
        let lowered = chunk.to_lowercase();
        if lowered == IRONY_MARKER || lexicon.is_emoticon(&lowered) {
            tokens.push(lowered);
            continue;
        }

        let trimmed_start = lowered.trim_start_matches(is_punctuation);
        let leading = &lowered[..lowered.len() - trimmed_start.len()];
        let core = trimmed_start.trim_end_matches(is_punctuation);
        let trailing = &trimmed_start[core.len()..];

        tokens.extend(leading.chars().map(String::from));
        push_word(core, &mut tokens);
        tokens.extend(trailing.chars().map(String::from));
    }

    tokens
}

fn push_word(word: &str, tokens: &mut Vec<String>) {
    if word.is_empty() {
        return;
    }
    match word.strip_suffix(NEGATION_CLITIC) {
        Some(stem) if !stem.is_empty() => {
            tokens.push(stem.to_string());
            tokens.push(NEGATION_CLITIC.to_string());
        }
        _ => tokens.push(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> std::sync::Arc<Lexicon> {
        Lexicon::bundled().unwrap()
    }

    #[test]
    fn test_splits_trailing_punctuation_per_character() {
        let tokens = tokenize("I love this!!!", &lexicon());
        assert_eq!(tokens, vec!["i", "love", "this", "!", "!", "!"]);
    }

    #[test]
    fn test_splits_leading_punctuation() {
        let tokens = tokenize("#happy \"quoted\"", &lexicon());
        assert_eq!(tokens, vec!["#", "happy", "\"", "quoted", "\""]);
    }

    #[test]
    fn test_splits_negation_clitic() {
        let tokens = tokenize("Don't go", &lexicon());
        assert_eq!(tokens, vec!["do", "n't", "go"]);
    }

    #[test]
    fn test_keeps_emoticons_and_irony_marker() {
        let tokens = tokenize("great :) sure (!) :D", &lexicon());
        assert_eq!(tokens, vec!["great", ":)", "sure", "(!)", ":d"]);
    }

    #[test]
    fn test_inner_punctuation_stays_in_word() {
        let tokens = tokenize("it's well-known", &lexicon());
        assert_eq!(tokens, vec!["it's", "well-known"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(tokenize("", &lexicon()).is_empty());
        assert_eq!(tokenize("...", &lexicon()), vec![".", ".", "."]);
    }
}
