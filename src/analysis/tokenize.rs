// Tokenization and normalization.
//
// Turns raw transcript text into a flat sequence of lowercase tokens, each
// tagged with a coarse grammatical class. Punctuation is segmented into its
// own single-character tokens rather than stripped — the phrase filter needs
// to see it.
//
// Class assignment is a deterministic, context-free approximation of the
// universal tagset: closed-class word lists first, then suffix heuristics,
// defaulting to noun. Transcript speech is messy enough that a contextual
// tagger would not buy much here.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Coarse grammatical class, serialized with universal-tagset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordClass {
    #[serde(rename = "NOUN")]
    Noun,
    #[serde(rename = "VERB")]
    Verb,
    #[serde(rename = "ADJ")]
    Adjective,
    #[serde(rename = "ADV")]
    Adverb,
    #[serde(rename = "PRON")]
    Pronoun,
    #[serde(rename = "DET")]
    Determiner,
    #[serde(rename = "ADP")]
    Adposition,
    #[serde(rename = "CONJ")]
    Conjunction,
    #[serde(rename = "NUM")]
    Numeral,
    #[serde(rename = "PRT")]
    Particle,
    #[serde(rename = ".")]
    Punctuation,
    #[serde(rename = "X")]
    Other,
}

impl WordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordClass::Noun => "NOUN",
            WordClass::Verb => "VERB",
            WordClass::Adjective => "ADJ",
            WordClass::Adverb => "ADV",
            WordClass::Pronoun => "PRON",
            WordClass::Determiner => "DET",
            WordClass::Adposition => "ADP",
            WordClass::Conjunction => "CONJ",
            WordClass::Numeral => "NUM",
            WordClass::Particle => "PRT",
            WordClass::Punctuation => ".",
            WordClass::Other => "X",
        }
    }
}

impl std::fmt::Display for WordClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized token: lowercase surface form plus its coarse class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub word: String,
    pub class: WordClass,
}

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    // Runs of alphanumerics (internal apostrophes allowed, so "don't" stays
    // one token), or any single non-space symbol as its own token.
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"[a-z0-9]+(?:'[a-z0-9]+)*|[^\sa-z0-9]").expect("token pattern is valid")
    })
}

/// Tokenize one stretch of cleaned transcript text.
///
/// Lowercases, segments words and punctuation, and tags each token. The
/// result is an eager vector so multiple consumers (word counter, phrase
/// extractor) can traverse it independently. Empty input yields an empty
/// vector; no input can make this fail.
pub fn tokenize(text: &str) -> Vec<Token> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| {
            let word = m.as_str().to_string();
            let class = classify(&word);
            Token { word, class }
        })
        .collect()
}

static PRONOUNS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static DETERMINERS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static ADPOSITIONS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static CONJUNCTIONS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static COMMON_VERBS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static COMMON_ADVERBS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn pronouns() -> &'static HashSet<&'static str> {
    PRONOUNS.get_or_init(|| {
        [
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
            "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs",
            "myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves",
            "themselves", "who", "whom", "whose", "somebody", "someone", "something", "anybody",
            "anyone", "anything", "everybody", "everyone", "everything", "nobody", "nothing",
        ]
        .into_iter()
        .collect()
    })
}

fn determiners() -> &'static HashSet<&'static str> {
    DETERMINERS.get_or_init(|| {
        [
            "the", "a", "an", "this", "that", "these", "those", "which", "what", "each", "every",
            "either", "neither", "some", "any", "no", "all", "both", "several", "many", "much",
            "few", "another", "such",
        ]
        .into_iter()
        .collect()
    })
}

fn adpositions() -> &'static HashSet<&'static str> {
    ADPOSITIONS.get_or_init(|| {
        [
            "of", "in", "to", "for", "with", "on", "at", "by", "from", "up", "about", "into",
            "over", "after", "under", "between", "out", "against", "during", "without", "before",
            "around", "among", "through", "above", "below", "behind", "beside", "beyond", "near",
            "off", "onto", "toward", "towards", "upon", "within", "down",
        ]
        .into_iter()
        .collect()
    })
}

fn conjunctions() -> &'static HashSet<&'static str> {
    CONJUNCTIONS.get_or_init(|| {
        [
            "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although",
            "though", "unless", "since", "whether", "whereas", "until", "than",
        ]
        .into_iter()
        .collect()
    })
}

fn common_verbs() -> &'static HashSet<&'static str> {
    COMMON_VERBS.get_or_init(|| {
        [
            "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had",
            "having", "do", "does", "did", "doing", "will", "would", "can", "could", "shall",
            "should", "may", "might", "must", "get", "got", "gets", "go", "goes", "went", "gone",
            "make", "makes", "made", "say", "says", "said", "know", "knows", "knew", "think",
            "thinks", "thought", "see", "sees", "saw", "seen", "come", "comes", "came", "take",
            "takes", "took", "taken", "want", "wants", "wanted", "need", "needs", "let", "lets",
        ]
        .into_iter()
        .collect()
    })
}

fn common_adverbs() -> &'static HashSet<&'static str> {
    COMMON_ADVERBS.get_or_init(|| {
        [
            "very", "also", "just", "now", "then", "here", "there", "well", "only", "even",
            "still", "too", "again", "never", "always", "often", "really", "quite", "rather",
            "almost", "already", "soon", "perhaps", "maybe", "however", "instead", "away", "back",
            "when", "where", "why", "how", "not",
        ]
        .into_iter()
        .collect()
    })
}

/// Assign a coarse class to one normalized token.
///
/// Pure function of the token string — the same word always gets the same
/// class, so counting by (word, class) pairs groups exactly by word.
fn classify(word: &str) -> WordClass {
    if !word.chars().any(|c| c.is_alphanumeric()) {
        return WordClass::Punctuation;
    }
    if word.chars().all(|c| c.is_ascii_digit()) {
        return WordClass::Numeral;
    }
    if pronouns().contains(word) {
        return WordClass::Pronoun;
    }
    if determiners().contains(word) {
        return WordClass::Determiner;
    }
    if adpositions().contains(word) {
        return WordClass::Adposition;
    }
    if conjunctions().contains(word) {
        return WordClass::Conjunction;
    }
    if common_verbs().contains(word) {
        return WordClass::Verb;
    }
    if common_adverbs().contains(word) {
        return WordClass::Adverb;
    }

    // Open-class suffix heuristics, most reliable first
    if word.len() > 3 && word.ends_with("ly") {
        return WordClass::Adverb;
    }
    if word.len() > 4 && (word.ends_with("ing") || word.ends_with("ed")) {
        return WordClass::Verb;
    }
    let adjective_suffixes = [
        "ous", "ful", "ive", "able", "ible", "ish", "less", "ical", "ian",
    ];
    if word.len() > 4 && adjective_suffixes.iter().any(|s| word.ends_with(s)) {
        return WordClass::Adjective;
    }
    let noun_suffixes = [
        "tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence", "ism", "ology",
    ];
    if word.len() > 4 && noun_suffixes.iter().any(|s| word.ends_with(s)) {
        return WordClass::Noun;
    }

    WordClass::Noun
}
