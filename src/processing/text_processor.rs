//! Text normalization and word tokenization

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Clitics split off the end of a word, Treebank style.
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

pub struct TextProcessor {
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        Self { whitespace_regex }
    }

    /// Collapse every whitespace run to a single space and trim both ends.
    pub fn normalize_whitespace(&self, text: &str) -> String {
        self.whitespace_regex.replace_all(text, " ").trim().to_string()
    }

    /// Split text into word and punctuation tokens.
    ///
    /// Built on Unicode word boundaries, with a few adjustments so that
    /// resume vocabulary survives: `c++` and `c#` stay whole, hyphenated
    /// compounds stay whole, and clitics such as `'s` become their own token.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut adjacent = false;
        let mut open_hyphen = false;

        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                if open_hyphen {
                    close_hyphen(&mut tokens);
                    open_hyphen = false;
                }
                adjacent = false;
                continue;
            }

            let is_word = segment.chars().any(char::is_alphanumeric);

            if open_hyphen {
                open_hyphen = false;
                if is_word {
                    if let Some(last) = tokens.last_mut() {
                        last.push_str(segment);
                        adjacent = true;
                        continue;
                    }
                }
                close_hyphen(&mut tokens);
            }

            match tokens.last_mut() {
                Some(last)
                    if adjacent && (segment == "+" || segment == "#") && starts_alphabetic(last) =>
                {
                    last.push_str(segment);
                }
                Some(last) if adjacent && segment == "-" && is_word_token(last) => {
                    last.push('-');
                    open_hyphen = true;
                }
                _ => tokens.push(segment.to_string()),
            }
            adjacent = true;
        }

        if open_hyphen {
            close_hyphen(&mut tokens);
        }

        tokens.into_iter().flat_map(split_clitic).collect()
    }
}

fn starts_alphabetic(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_alphabetic)
}

fn is_word_token(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric) && !token.ends_with('-')
}

/// A dangling `-` with no right-hand word becomes its own token again.
fn close_hyphen(tokens: &mut Vec<String>) {
    if let Some(last) = tokens.last_mut() {
        if last.len() > 1 && last.ends_with('-') {
            last.pop();
            tokens.push("-".to_string());
        }
    }
}

fn split_clitic(token: String) -> Vec<String> {
    let folded = token.replace('\u{2019}', "'").to_lowercase();
    for clitic in CLITICS {
        if folded.ends_with(clitic) && folded.chars().count() > clitic.chars().count() {
            let stem_chars = token.chars().count() - clitic.chars().count();
            let stem: String = token.chars().take(stem_chars).collect();
            let tail: String = token.chars().skip(stem_chars).collect();
            return vec![stem, tail];
        }
    }
    vec![token]
}
