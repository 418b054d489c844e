//! Letter catalog
//!
//! Glyphs the game can drop, each with the phonetic key used to look up a
//! recorded pronunciation.

use rand::Rng;
use serde::Serialize;

/// One catalog entry
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct LetterSpec {
    /// Devanagari glyph (also the text handed to speech synthesis)
    pub glyph: &'static str,
    /// Phonetic key (`ka`, `ta_soft`, ...)
    pub phonetic: &'static str,
}

const fn letter(glyph: &'static str, phonetic: &'static str) -> LetterSpec {
    LetterSpec { glyph, phonetic }
}

/// Hindi vowels and consonants
pub static HINDI_LETTERS: [LetterSpec; 40] = [
    letter("अ", "a"),
    letter("आ", "aa"),
    letter("इ", "i"),
    letter("ई", "ee"),
    letter("उ", "u"),
    letter("ऊ", "oo"),
    letter("ए", "e"),
    letter("ऐ", "ai"),
    letter("ओ", "o"),
    letter("औ", "au"),
    letter("क", "ka"),
    letter("ख", "kha"),
    letter("ग", "ga"),
    letter("घ", "gha"),
    letter("च", "cha"),
    letter("छ", "chha"),
    letter("ज", "ja"),
    letter("झ", "jha"),
    letter("ट", "ta"),
    letter("ठ", "tha"),
    letter("ड", "da"),
    letter("ढ", "dha"),
    letter("त", "ta_soft"),
    letter("थ", "tha_soft"),
    letter("द", "da_soft"),
    letter("ध", "dha_soft"),
    letter("न", "na"),
    letter("प", "pa"),
    letter("फ", "pha"),
    letter("ब", "ba"),
    letter("भ", "bha"),
    letter("म", "ma"),
    letter("य", "ya"),
    letter("र", "ra"),
    letter("ल", "la"),
    letter("व", "va"),
    letter("श", "sha"),
    letter("ष", "sha_hard"),
    letter("स", "sa"),
    letter("ह", "ha"),
];

/// Uniformly random catalog entry
pub fn random_letter<R: Rng>(rng: &mut R) -> &'static LetterSpec {
    &HINDI_LETTERS[rng.random_range(0..HINDI_LETTERS.len())]
}

/// Random entry whose glyph is not in `exclude` (resamples on collision)
pub fn random_letter_excluding<R: Rng>(
    rng: &mut R,
    exclude: &[&'static str],
) -> &'static LetterSpec {
    debug_assert!(
        exclude.len() < HINDI_LETTERS.len(),
        "catalog exhausted by exclusion list"
    );
    loop {
        let candidate = random_letter(rng);
        if !exclude.contains(&candidate.glyph) {
            return candidate;
        }
    }
}
