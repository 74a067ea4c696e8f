//! Lexicon filters for propagation candidates
//!
//! Two read-only sets of lowercase tokens. Stop words cover common Dutch and
//! English function words, booleans and form-field labels. Name prefixes are
//! the particles ("tussenvoegsels") that belong to a surname but must never be
//! propagated on their own.

use std::collections::HashSet;

const STOP_WORDS: &[&str] = &[
    // Dutch function words
    "aan", "al", "als", "bij", "dan", "dat", "de", "den", "der", "des", "die", "dit", "door",
    "een", "en", "er", "had", "heb", "hebben", "heeft", "het", "hij", "hem", "hun", "ik", "in",
    "is", "je", "jij", "kan", "me", "mij", "met", "mijn", "na", "naar", "niet", "nog", "nu",
    "of", "om", "omdat", "onder", "ons", "ook", "op", "over", "te", "tot", "u", "uit", "uw",
    "van", "voor", "was", "wat", "we", "wel", "werd", "wij", "wordt", "zal", "ze", "zich",
    "zij", "zijn", "zo", "zou",
    // English function words
    "a", "an", "and", "are", "for", "from", "his", "her", "not", "the", "this", "that", "with",
    "you", "your",
    // Booleans and empty markers
    "ja", "nee", "yes", "no", "true", "false", "waar", "onwaar", "null", "none", "nil", "n/a",
    "onbekend", "unknown",
    // Field labels
    "naam", "voornaam", "achternaam", "adres", "straat", "huisnummer", "postcode", "woonplaats",
    "plaats", "telefoon", "telefoonnummer", "mobiel", "email", "e-mail", "mail", "emailadres",
    "geboortedatum", "datum", "bsn", "kvk", "iban", "rekeningnummer", "klant", "patient",
    "patiënt", "dhr", "mevr", "mw", "heer", "mevrouw", "name", "address", "phone", "date",
    "info", "contact", "admin", "support", "noreply", "no-reply",
];

const NAME_PREFIXES: &[&str] = &[
    "van", "de", "der", "den", "het", "ter", "ten", "te", "op", "in", "la", "le", "du", "da",
    "di", "del", "della", "von", "vom", "zu", "dos", "das", "'t", "'s", "d'", "l'", "toe", "uit",
    "aan", "bij", "onder", "over", "voor", "vanden", "vander", "vd", "v.d.",
];

/// Stop-word and name-prefix filter
#[derive(Debug, Clone)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    name_prefixes: HashSet<String>,
}

impl Lexicon {
    /// Built-in Dutch lexicon
    pub fn dutch() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            name_prefixes: NAME_PREFIXES.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add deployment-specific stop words, stored lowercase
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(&token.to_lowercase())
    }

    pub fn is_name_prefix(&self, token: &str) -> bool {
        self.name_prefixes.contains(&token.to_lowercase())
    }

    /// True if the token's lowercase form is in either set
    pub fn is_filtered(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        self.stop_words.contains(&lower) || self.name_prefixes.contains(&lower)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::dutch()
    }
}
