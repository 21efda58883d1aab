use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Maps raw text to an ordered sequence of normalized terms.
///
/// Implementations must be deterministic: identical input yields an
/// identical term sequence. An empty output sequence is valid (e.g. an
/// all-stopword input) and the collection rejects such documents.
pub trait TermProcessor {
    fn process(&self, text: &str) -> Vec<String>;
}

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"(?u)\p{L}+").expect("valid regex");
    static ref STOPWORDS_PT: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","à","ao","aos","aquela","aquelas","aquele","aqueles","aquilo","as","às","até",
            "com","como","da","das","de","dela","delas","dele","deles","depois","do","dos",
            "e","é","ela","elas","ele","eles","em","entre","era","eram","éramos","essa","essas",
            "esse","esses","esta","está","estamos","estão","estar","estas","estava","estavam",
            "estávamos","este","estes","estou","eu",
            "foi","fomos","for","fora","foram","forem","fosse","fossem","fui",
            "há","haja","hão","havemos","hei","houve","isso","isto","já",
            "lhe","lhes","mais","mas","me","mesmo","meu","meus","minha","minhas","muito",
            "na","não","nas","nem","no","nos","nós","nossa","nossas","nosso","nossos","num","numa",
            "o","os","ou","para","pela","pelas","pelo","pelos","por",
            "qual","quando","que","quem",
            "são","se","seja","sejam","sem","ser","será","serão","serei","seremos","seu","seus",
            "só","somos","sou","sua","suas",
            "também","te","tem","têm","temos","tenha","tenham","tenho","terá","terão","terei",
            "teremos","teu","teus","teve","tinha","tinham","tínhamos","tive","tivemos","tu","tua","tuas",
            "um","uma","você","vocês","vos",
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS_PT.contains(token)
}

/// Default processor: NFC normalization, lowercase, stopword removal,
/// single-character drop, and Portuguese Snowball stemming.
pub struct PortugueseProcessor {
    stemmer: Stemmer,
}

impl PortugueseProcessor {
    pub fn new() -> Self {
        Self { stemmer: Stemmer::create(Algorithm::Portuguese) }
    }
}

impl Default for PortugueseProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TermProcessor for PortugueseProcessor {
    fn process(&self, text: &str) -> Vec<String> {
        let normalized = text.nfc().collect::<String>().to_lowercase();
        let mut terms = Vec::new();
        for mat in WORD_RE.find_iter(&normalized) {
            let token = mat.as_str();
            if token.chars().count() <= 1 || is_stopword(token) {
                continue;
            }
            terms.push(self.stemmer.stem(token).to_string());
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_stopwords_and_short_tokens() {
        let p = PortugueseProcessor::new();
        let terms = p.process("o sol e a liberdade");
        assert_eq!(terms.len(), 2);
        assert!(!terms.iter().any(|t| t == "o" || t == "e" || t == "a"));
    }

    #[test]
    fn stems_inflected_forms_together() {
        let p = PortugueseProcessor::new();
        let singular = p.process("casa");
        let plural = p.process("casas");
        assert_eq!(singular, plural);
    }

    #[test]
    fn strips_digits_and_punctuation() {
        let p = PortugueseProcessor::new();
        let terms = p.process("vento, 42 ventos!");
        assert!(terms.iter().all(|t| t.chars().all(char::is_alphabetic)));
    }

    #[test]
    fn deterministic_for_identical_input() {
        let p = PortugueseProcessor::new();
        let text = "A liberdade é o vento que sopra sobre o mar.";
        assert_eq!(p.process(text), p.process(text));
    }

    #[test]
    fn all_stopword_input_is_empty() {
        let p = PortugueseProcessor::new();
        assert!(p.process("o e a de um uma").is_empty());
    }
}
