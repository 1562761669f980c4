//! Rule registry: banned terms, contact patterns and promotional phrases.
//!
//! A `RuleSet` is compiled once and never mutated afterwards. Every term and
//! pattern is validated at construction, so a rule that cannot be applied is
//! rejected at startup instead of silently matching nothing at runtime.

use std::collections::HashSet;

use regex::{Match, Regex};

use crate::error::RuleError;

/// Profanity, slurs, adult, drug and violence terms. Checked in order.
pub const PROFANITY_TERMS: &[&str] = &[
    // Basic profanity
    "fuck", "shit", "damn", "hell", "ass", "bitch", "bastard", "crap", "piss", "dick", "cock",
    "pussy", "cunt", "fag", "slut", "whore",
    // Obfuscated spellings
    "f*ck", "sh*t", "b*tch", "a$$", "fuk", "fuq", "fvck", "sh1t", "b1tch", "a55", "pr0n",
    "n1gger", "f@ck", "sh!t", "@ss",
    // Slurs
    "nigger", "nigga", "chink", "spic", "wetback", "kike", "gook",
    // Adult
    "porn", "sex", "nude", "naked", "xxx", "nsfw", "18+", "adult", "escort", "prostitute",
    "hooker", "onlyfans", "camgirl",
    // Drugs
    "cocaine", "heroin", "meth", "weed", "marijuana", "420", "drugs", "mdma", "ecstasy", "lsd",
    "crack", "pills", "xanax", "oxycontin",
    // Violence
    "kill", "murder", "suicide", "rape", "assault", "bomb", "terrorist", "weapon", "gun",
    "knife", "shoot", "stab",
];

/// A matched profanity term containing one of these is reported as adult content.
pub const ADULT_MARKERS: &[&str] = &["sex", "porn", "nude"];

/// Contact and website patterns, most specific first.
///
/// Matching is case-insensitive and stops at the first pattern that hits,
/// so a full email is reported before its `@handle` or bare domain part and
/// a phone number before a generic digit run.
pub const CONTACT_PATTERNS: &[(&str, &str)] = &[
    ("email", r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b"),
    ("url", r"https?://[^\s]+"),
    ("www", r"www\.[^\s]+"),
    (
        "platform",
        r"\b(?:(?:instagram|facebook|twitter|tiktok|snapchat)\.com|telegram\.me|discord\.gg)\b",
    ),
    (
        "domain",
        r"[a-z0-9]+\.(?:com|org|net|io|co|app|xyz|site|online|store|shop)\b[^\s]*",
    ),
    ("handle", r"@[a-z0-9_]+"),
    ("phone", r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b"),
    ("digits", r"\b\d{5,}\b"),
];

/// Promotional and off-platform payment phrases, matched as substrings.
pub const PROMOTIONAL_PHRASES: &[&str] = &[
    "click here",
    "click link",
    "follow me",
    "dm me",
    "message me",
    "whatsapp",
    "telegram",
    "cashapp",
    "venmo",
    "paypal",
    "zelle",
    "bitcoin",
    "crypto",
    "investment",
    "forex",
    "mlm",
    "pyramid",
    "get rich",
    "make money",
    "work from home",
    "limited time",
    "act now",
    "don't miss",
    "exclusive offer",
    "promo code",
];

/// Mild words that `clean_text` masks instead of rejecting.
pub const MILD_TERMS: &[&str] = &["damn", "hell", "crap"];

// ── Compiled rules ──────────────────────────────────────────────────

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A lower-cased term with a case-insensitive matcher that only accepts
/// occurrences bounded by non-word characters or the ends of the text.
#[derive(Debug, Clone)]
pub struct WordTerm {
    term: String,
    regex: Regex,
}

impl WordTerm {
    fn compile(term: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(&format!("(?i){}", regex::escape(term))).map_err(|source| {
            RuleError::InvalidPattern {
                name: term.to_string(),
                source,
            }
        })?;
        Ok(Self {
            term: term.to_string(),
            regex,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whole-word occurrences of the term in `text`.
    pub fn find_iter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Match<'t>> + 't {
        self.regex.find_iter(text).filter(move |m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find_iter(text).next().is_some()
    }
}

/// A named contact/website pattern.
#[derive(Debug, Clone)]
pub struct ContactPattern {
    /// Short rule name used in logs and precedence tests.
    pub name: String,
    /// Compiled, case-insensitive regex.
    pub regex: Regex,
}

/// Immutable, validated moderation rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    profanity: Vec<WordTerm>,
    adult_markers: Vec<String>,
    contact_patterns: Vec<ContactPattern>,
    promotional_phrases: Vec<String>,
    mild_terms: Vec<WordTerm>,
}

impl RuleSet {
    /// The compiled-in rule lists.
    pub fn builtin() -> Result<Self, RuleError> {
        let mut builder = Self::builder()
            .profanity_terms(PROFANITY_TERMS.iter().copied())
            .adult_markers(ADULT_MARKERS.iter().copied())
            .promotional_phrases(PROMOTIONAL_PHRASES.iter().copied())
            .mild_terms(MILD_TERMS.iter().copied());
        for (name, pattern) in CONTACT_PATTERNS {
            builder = builder.contact_pattern(*name, *pattern);
        }
        builder.build()
    }

    /// Start an empty rule set.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// A rule set with no rules at all. Every detector passes everything.
    pub fn empty() -> Self {
        Self {
            profanity: Vec::new(),
            adult_markers: Vec::new(),
            contact_patterns: Vec::new(),
            promotional_phrases: Vec::new(),
            mild_terms: Vec::new(),
        }
    }

    pub fn profanity(&self) -> &[WordTerm] {
        &self.profanity
    }

    pub fn profanity_terms(&self) -> impl Iterator<Item = &str> {
        self.profanity.iter().map(WordTerm::term)
    }

    pub fn adult_markers(&self) -> &[String] {
        &self.adult_markers
    }

    pub fn contact_patterns(&self) -> &[ContactPattern] {
        &self.contact_patterns
    }

    pub fn promotional_phrases(&self) -> &[String] {
        &self.promotional_phrases
    }

    pub fn mild_terms(&self) -> &[WordTerm] {
        &self.mild_terms
    }

    /// Whether a matched term belongs to the adult sub-list.
    ///
    /// Looks at the term itself, never at the text around it.
    pub fn is_adult_term(&self, term: &str) -> bool {
        self.adult_markers.iter().any(|m| term.contains(m.as_str()))
    }
}

/// Collects raw rule lists and compiles them into a `RuleSet`.
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuilder {
    profanity_terms: Vec<String>,
    adult_markers: Vec<String>,
    contact_patterns: Vec<(String, String)>,
    promotional_phrases: Vec<String>,
    mild_terms: Vec<String>,
}

impl RuleSetBuilder {
    pub fn profanity_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profanity_terms.extend(terms.into_iter().map(Into::into));
        self
    }

    pub fn adult_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adult_markers.extend(markers.into_iter().map(Into::into));
        self
    }

    /// Append a contact pattern. Patterns are tried in insertion order.
    pub fn contact_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.contact_patterns.push((name.into(), pattern.into()));
        self
    }

    pub fn promotional_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.promotional_phrases
            .extend(phrases.into_iter().map(Into::into));
        self
    }

    pub fn mild_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mild_terms.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Normalize and compile every rule.
    pub fn build(self) -> Result<RuleSet, RuleError> {
        let profanity = compile_terms("profanity", &self.profanity_terms)?;
        let mild_terms = compile_terms("mild", &self.mild_terms)?;
        let adult_markers = normalize("adult marker", &self.adult_markers)?;
        let promotional_phrases = normalize("promotional", &self.promotional_phrases)?;

        let mut seen = HashSet::new();
        let mut contact_patterns = Vec::with_capacity(self.contact_patterns.len());
        for (index, (name, pattern)) in self.contact_patterns.into_iter().enumerate() {
            if name.trim().is_empty() || pattern.trim().is_empty() {
                return Err(RuleError::EmptyTerm {
                    list: "contact",
                    index,
                });
            }
            if !seen.insert(name.clone()) {
                return Err(RuleError::DuplicatePattern { name });
            }
            let regex = Regex::new(&format!("(?i){pattern}"))
                .map_err(|source| RuleError::InvalidPattern {
                    name: name.clone(),
                    source,
                })?;
            contact_patterns.push(ContactPattern { name, regex });
        }

        Ok(RuleSet {
            profanity,
            adult_markers,
            contact_patterns,
            promotional_phrases,
            mild_terms,
        })
    }
}

fn normalize(list: &'static str, entries: &[String]) -> Result<Vec<String>, RuleError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry = entry.trim().to_lowercase();
            if entry.is_empty() {
                Err(RuleError::EmptyTerm { list, index })
            } else {
                Ok(entry)
            }
        })
        .collect()
}

fn compile_terms(list: &'static str, entries: &[String]) -> Result<Vec<WordTerm>, RuleError> {
    normalize(list, entries)?
        .iter()
        .map(|term| WordTerm::compile(term))
        .collect()
}
