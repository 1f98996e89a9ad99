//! Treebank-style word tokenizer.
//!
//! Splits text into sentences, then applies the Penn Treebank substitution
//! passes (quotes, punctuation, brackets, clitics, compound contractions)
//! before splitting on whitespace. `what's` becomes `what` + `'s`,
//! `don't` becomes `do` + `n't` and a sentence-final period is its own token.

use lazy_static::lazy_static;
use regex::Regex;

fn rule(pattern: &str, replacement: &'static str) -> (Regex, &'static str) {
    (Regex::new(pattern).expect("regex ok"), replacement)
}

lazy_static! {
    static ref STARTING_QUOTES: Vec<(Regex, &'static str)> = vec![
        rule(r"([«“‘„]|[`]+)", " ${1} "),
        rule(r#"^""#, "``"),
        rule(r"(``)", " ${1} "),
        rule(r#"([ (\[{<])("|'{2})"#, "${1} `` "),
    ];
    static ref PUNCTUATION: Vec<(Regex, &'static str)> = vec![
        rule(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2} ${3} "),
        rule(r"([:,])([^\d])", " ${1} ${2}"),
        rule(r"([:,])$", " ${1} "),
        rule(r"\.{2,}", " ${0} "),
        rule(r"[;@#$%&]", " ${0} "),
        rule(r"[?!]", " ${0} "),
        rule(r"([^'])' ", "${1} ' "),
        rule(r"[*]", " ${0} "),
    ];
    static ref PARENS_BRACKETS: Regex = Regex::new(r"[\]\[(){}<>]").expect("regex ok");
    static ref DOUBLE_DASHES: Regex = Regex::new(r"--").expect("regex ok");
    static ref ENDING_QUOTES: Vec<(Regex, &'static str)> = vec![
        rule(r"([»”’])", " ${1} "),
        rule(r"''", " '' "),
        rule(r#"""#, " '' "),
        rule(r"\s+", " "),
        rule(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        rule(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ];
    static ref CONTRACTIONS: Vec<(Regex, &'static str)> = vec![
        rule(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        rule(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        rule(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        rule(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        rule(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        rule(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        rule(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        rule(r"(?i)\b(wan)(na)\s", " ${1} ${2} "),
        rule(r"(?i) ('t)(is)\b", " ${1} ${2} "),
        rule(r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ];
}

fn apply(rules: &[(Regex, &'static str)], text: String) -> String {
    rules.iter().fold(text, |acc, (re, replacement)| {
        re.replace_all(&acc, *replacement).into_owned()
    })
}

/// Splits text into sentences at `.`, `!` or `?` followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                let sentence = text[start..next_idx].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = next_idx;
            }
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let text = apply(&STARTING_QUOTES, sentence.to_string());
    let text = apply(&PUNCTUATION, text);
    let text = PARENS_BRACKETS.replace_all(&text, " ${0} ").into_owned();
    let text = DOUBLE_DASHES.replace_all(&text, " -- ").into_owned();
    let text = format!(" {} ", text);
    let text = apply(&ENDING_QUOTES, text);
    let text = apply(&CONTRACTIONS, text);

    text.split_whitespace().map(str::to_string).collect()
}

/// Tokenizes text into word-level units.
///
/// Case is preserved; callers lowercase first when they need to.
pub fn tokenize(text: &str) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .flat_map(tokenize_sentence)
        .collect()
}

/// Returns true when every character is alphanumeric and the token is non-empty.
pub fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}
