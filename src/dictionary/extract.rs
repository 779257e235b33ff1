//! Field extraction from dictionary entries
//!
//! Turns a raw [`DictionaryEntry`] into the flat fields stored for a word.
//! Missing pieces get fallbacks so every stored word has a meaning and an
//! example sentence.

use rand::seq::SliceRandom;
use rand::Rng;

use super::models::DictionaryEntry;
use crate::storage::NewWord;

/// Longest meaning kept from a definition, in characters
const MAX_MEANING_CHARS: usize = 100;

/// Templates used when the dictionary has no example sentence
const EXAMPLE_TEMPLATES: &[&str] = &[
    "The {} is very interesting.",
    "I like to {} every day.",
    "She can {} very well.",
    "They are {} right now.",
    "We need to {} this book.",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Phonetics {
    pub phonetic_uk: String,
    pub phonetic_us: String,
    pub audio_uk: String,
    pub audio_us: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeaningFields {
    pub meaning: String,
    pub example: String,
    pub part_of_speech: String,
}

/// Sort phonetic spellings and audio URLs into UK and US slots.
///
/// Text tagged "UK" or "US" goes to that slot; the first untagged text fills
/// the UK slot if it is still empty. Audio URLs are matched on "uk"/"us".
pub fn extract_phonetics(entry: &DictionaryEntry) -> Phonetics {
    let mut phonetics = Phonetics::default();

    for phonetic in &entry.phonetics {
        if let Some(text) = phonetic.text.as_deref().filter(|t| !t.is_empty()) {
            if text.contains("UK") {
                phonetics.phonetic_uk = text.to_string();
            } else if text.contains("US") {
                phonetics.phonetic_us = text.to_string();
            } else if phonetics.phonetic_uk.is_empty() {
                phonetics.phonetic_uk = text.to_string();
            }
        }

        if let Some(audio) = phonetic.audio.as_deref().filter(|a| !a.is_empty()) {
            if audio.contains("uk") {
                phonetics.audio_uk = audio.to_string();
            } else if audio.contains("us") {
                phonetics.audio_us = audio.to_string();
            }
        }
    }

    phonetics
}

/// First definition of the first meaning, with its example and part of speech
pub fn extract_meaning(entry: &DictionaryEntry) -> MeaningFields {
    let Some(first) = entry.meanings.first() else {
        return MeaningFields::default();
    };

    let mut fields = MeaningFields {
        part_of_speech: first.part_of_speech.clone(),
        ..Default::default()
    };

    if let Some(definition) = first.definitions.first() {
        fields.meaning = definition.definition.chars().take(MAX_MEANING_CHARS).collect();
        fields.example = definition.example.clone().unwrap_or_default();
    }

    fields
}

/// A template sentence mentioning the word
pub fn fallback_example<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let template = EXAMPLE_TEMPLATES
        .choose(rng)
        .copied()
        .unwrap_or(EXAMPLE_TEMPLATES[0]);
    template.replacen("{}", word, 1)
}

/// The example with the first occurrence of the word bracketed
pub fn example_translation(sentence: &str, word: &str) -> String {
    if word.is_empty() || !sentence.contains(word) {
        return sentence.to_string();
    }
    sentence.replacen(word, &format!("[{}]", word), 1)
}

/// Build the stored fields for `query` from its dictionary entry
pub fn build_new_word<R: Rng + ?Sized>(
    query: &str,
    entry: &DictionaryEntry,
    rng: &mut R,
) -> NewWord {
    let word = query.trim().to_lowercase();
    let phonetics = extract_phonetics(entry);
    let meaning = extract_meaning(entry);

    let example_sentence = if meaning.example.is_empty() {
        fallback_example(&word, rng)
    } else {
        meaning.example
    };
    let example_translation = example_translation(&example_sentence, &word);

    let meaning_text = if meaning.meaning.is_empty() {
        format!("Definition of {}", word)
    } else {
        meaning.meaning
    };

    NewWord {
        word,
        meaning: meaning_text,
        phonetic_uk: phonetics.phonetic_uk,
        phonetic_us: phonetics.phonetic_us,
        audio_uk: phonetics.audio_uk,
        audio_us: phonetics.audio_us,
        example_sentence,
        example_translation,
        part_of_speech: meaning.part_of_speech,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::models::{Definition, Meaning, Phonetic};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn phonetic(text: Option<&str>, audio: Option<&str>) -> Phonetic {
        Phonetic {
            text: text.map(str::to_string),
            audio: audio.map(str::to_string),
        }
    }

    fn entry_with_meaning(definition: &str, example: Option<&str>) -> DictionaryEntry {
        DictionaryEntry {
            word: "hello".to_string(),
            meanings: vec![Meaning {
                part_of_speech: "interjection".to_string(),
                definitions: vec![Definition {
                    definition: definition.to_string(),
                    example: example.map(str::to_string),
                }],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_phonetics_tagged_and_untagged() {
        let entry = DictionaryEntry {
            word: "tomato".to_string(),
            phonetics: vec![
                phonetic(Some("/təˈmɑː.təʊ/"), Some("https://x/tomato-uk.mp3")),
                phonetic(Some("US /təˈmeɪ.t̬oʊ/"), Some("https://x/tomato-us.mp3")),
                phonetic(Some("/other/"), None),
            ],
            ..Default::default()
        };

        let phonetics = extract_phonetics(&entry);
        assert_eq!(phonetics.phonetic_uk, "/təˈmɑː.təʊ/");
        assert_eq!(phonetics.phonetic_us, "US /təˈmeɪ.t̬oʊ/");
        assert_eq!(phonetics.audio_uk, "https://x/tomato-uk.mp3");
        assert_eq!(phonetics.audio_us, "https://x/tomato-us.mp3");
    }

    #[test]
    fn test_extract_phonetics_uk_tag_overrides() {
        let entry = DictionaryEntry {
            phonetics: vec![phonetic(Some("/first/"), None), phonetic(Some("UK /second/"), None)],
            ..Default::default()
        };

        assert_eq!(extract_phonetics(&entry).phonetic_uk, "UK /second/");
    }

    #[test]
    fn test_extract_meaning_truncates() {
        let long = "x".repeat(150);
        let fields = extract_meaning(&entry_with_meaning(&long, Some("Hello there!")));

        assert_eq!(fields.meaning.chars().count(), 100);
        assert_eq!(fields.example, "Hello there!");
        assert_eq!(fields.part_of_speech, "interjection");
    }

    #[test]
    fn test_extract_meaning_without_meanings() {
        assert_eq!(extract_meaning(&DictionaryEntry::default()), MeaningFields::default());
    }

    #[test]
    fn test_example_translation_brackets_first_match() {
        assert_eq!(
            example_translation("run and run again", "run"),
            "[run] and run again"
        );
        assert_eq!(example_translation("nothing here", "word"), "nothing here");
    }

    #[test]
    fn test_fallback_example_mentions_word() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert!(fallback_example("jump", &mut rng).contains("jump"));
        }
    }

    #[test]
    fn test_build_new_word_fallbacks() {
        let mut rng = StdRng::seed_from_u64(1);
        let entry = DictionaryEntry {
            word: "zyx".to_string(),
            ..Default::default()
        };

        let fields = build_new_word("  ZYX ", &entry, &mut rng);
        assert_eq!(fields.word, "zyx");
        assert_eq!(fields.meaning, "Definition of zyx");
        assert!(fields.example_sentence.contains("zyx"));
        assert!(fields.example_translation.contains("[zyx]"));
    }

    #[test]
    fn test_build_new_word_uses_entry() {
        let mut rng = StdRng::seed_from_u64(1);
        let entry = entry_with_meaning("A greeting.", Some("She said hello to everyone."));

        let fields = build_new_word("hello", &entry, &mut rng);
        assert_eq!(fields.meaning, "A greeting.");
        assert_eq!(fields.example_sentence, "She said hello to everyone.");
        assert_eq!(fields.example_translation, "She said [hello] to everyone.");
        assert_eq!(fields.part_of_speech, "interjection");
    }
}
