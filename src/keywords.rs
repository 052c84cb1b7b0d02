//! Keyword path: tokenization seam, noun ranking, wordcloud feed.
//!
//! Independent of the classification engine; shares no state with it.
//! The tokenizer is injected behind a trait so the pipeline never knows
//! how morphological analysis is configured. The built-in tokenizer is a
//! character-class heuristic; a dictionary-backed analyzer can be plugged
//! in behind the same trait.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AnalysisError;

/// A surface form with its part-of-speech tag. Only the tag is inspected
/// here (noun filtering); the surface is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub pos: String,
}

impl Token {
    pub fn new(surface: impl Into<String>, pos: impl Into<String>) -> Token {
        Token {
            surface: surface.into(),
            pos: pos.into(),
        }
    }

    pub fn is_noun(&self) -> bool {
        self.pos == "名詞"
    }
}

pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

// ── Built-in character-class tokenizer ──────────────────────────────

#[derive(PartialEq, Eq, Clone, Copy)]
enum CharClass {
    Han,
    Katakana,
    Hiragana,
    Alnum,
    Other,
}

fn char_class(c: char) -> CharClass {
    match c {
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '々' => CharClass::Han,
        '\u{30A0}'..='\u{30FF}' => CharClass::Katakana,
        '\u{3040}'..='\u{309F}' => CharClass::Hiragana,
        c if c.is_ascii_alphanumeric() => CharClass::Alnum,
        _ => CharClass::Other,
    }
}

fn class_pos(class: CharClass) -> Option<&'static str> {
    match class {
        // Ideograph, katakana and latin runs are overwhelmingly content
        // words in chat text; hiragana runs are function words.
        CharClass::Han | CharClass::Katakana | CharClass::Alnum => Some("名詞"),
        CharClass::Hiragana => Some("助詞"),
        CharClass::Other => None,
    }
}

/// Heuristic tokenizer: segments the text into maximal same-class runs
/// and tags each run by its character class. No dictionary, fully
/// deterministic.
pub struct CharClassTokenizer;

impl Tokenizer for CharClassTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut run = String::new();
        let mut run_class = CharClass::Other;

        let flush = |run: &mut String, class: CharClass, tokens: &mut Vec<Token>| {
            if !run.is_empty() {
                if let Some(pos) = class_pos(class) {
                    tokens.push(Token::new(run.clone(), pos));
                }
                run.clear();
            }
        };

        for c in text.chars() {
            let class = char_class(c);
            if class != run_class {
                flush(&mut run, run_class, &mut tokens);
                run_class = class;
            }
            if class != CharClass::Other {
                run.push(c);
            }
        }
        flush(&mut run, run_class, &mut tokens);
        tokens
    }
}

// ── Noun ranking ────────────────────────────────────────────────────

/// Count noun surface-form frequency and return the top `limit`, ties
/// broken by first occurrence (stable).
pub fn top_keywords(tokens: &[Token], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for token in tokens.iter().filter(|t| t.is_noun()) {
        let entry = counts.entry(token.surface.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(token.surface.as_str());
        }
        *entry += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|surface| (surface.to_string(), counts[surface]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

// ── Wordcloud feed ──────────────────────────────────────────────────

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"<@[A-Z0-9]+>").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static EMOJI_SHORTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r":[a-z_]+:").unwrap());

/// Strip chat markup (mentions, URLs, emoji shortcodes) that would
/// otherwise pollute the token stream.
pub fn strip_chat_markup(text: &str) -> String {
    let text = MENTION.replace_all(text, "");
    let text = URL.replace_all(&text, "");
    EMOJI_SHORTCODE.replace_all(&text, "").into_owned()
}

/// The space-joined noun stream handed to the renderer.
pub fn noun_stream(tokenizer: &dyn Tokenizer, text: &str) -> String {
    let cleaned = strip_chat_markup(text);
    tokenizer
        .tokenize(&cleaned)
        .into_iter()
        .filter(|t| t.is_noun())
        .map(|t| t.surface)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Rendering seam for the wordcloud variant. The built-in implementation
/// writes the raw token stream; an image renderer fits behind the same
/// trait.
pub trait Renderer {
    fn render(&self, joined_tokens: &str, output: &Path) -> Result<(), AnalysisError>;
}

pub struct TokenTextRenderer;

impl Renderer for TokenTextRenderer {
    fn render(&self, joined_tokens: &str, output: &Path) -> Result<(), AnalysisError> {
        let mut body = joined_tokens.to_string();
        body.push('\n');
        fs::write(output, body).map_err(|source| AnalysisError::io(output, source))
    }
}
