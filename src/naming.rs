//! Case conversion for item keys and content type names.
//!
//! Keys are split into words on any run of non-alphanumeric characters and on
//! case boundaries (`createdOn` -> `created`, `On`; `XMLHttp` -> `XML`, `Http`),
//! then reassembled. Both conversions are idempotent.

use regex::Regex;
use std::sync::OnceLock;

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator regex is valid"))
}

fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    for segment in separators().split(input).filter(|s| !s.is_empty()) {
        let chars: Vec<char> = segment.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && !current.is_empty() && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let starts_word = prev.is_lowercase()
                    || prev.is_numeric()
                    || (prev.is_uppercase() && next_is_lower);
                if starts_word {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn join_words(input: &str, pascal: bool) -> String {
    let words = split_words(input);
    if words.is_empty() {
        // Nothing but separators; keep the key addressable.
        return input.to_string();
    }
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 && !pascal {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

/// `created_on` -> `createdOn`, `foo-bar` -> `fooBar`, `userID` -> `userId`.
pub fn camel_case(input: &str) -> String {
    join_words(input, false)
}

/// `blog_posts` -> `BlogPosts`.
pub fn pascal_case(input: &str) -> String {
    join_words(input, true)
}
