use log::debug;
use strum_macros::{Display, EnumString, IntoStaticStr};

use super::language::primary_subtag;

const FEMALE_KEYWORDS: &[&str] = &[
    "female", "woman", "she", "samantha", "victoria", "karen", "moira", "fiona", "zira", "susan",
];

const MALE_KEYWORDS: &[&str] = &["male", "man", "he", "david", "mark", "daniel", "george"];

/// The gender of the voice a caller would like to hear.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum VoiceGender {
    /// A female voice.
    Female,
    /// A male voice.
    Male,
}

impl VoiceGender {
    /// Returns the lower-case name fragments that suggest a voice has this gender.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Female => FEMALE_KEYWORDS,
            Self::Male => MALE_KEYWORDS,
        }
    }

    fn matches(&self, lowercase_name: &str) -> bool {
        self.keywords().iter().any(|keyword| lowercase_name.contains(keyword))
    }
}

/// A speech profile installed on the platform.
///
/// Voices are supplied by the platform's speech engine. Names are free text and are not
/// guaranteed to be unique or stable across sessions.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voice {
    name: String,
    language: String,
}

impl Voice {
    /// Creates a voice description with the given display name and language tag.
    pub fn new<N: Into<String>, L: Into<String>>(name: N, language: L) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }

    /// Returns the display name of this voice.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the language tag of this voice, e.g. `en-US`.
    pub fn language(&self) -> &str {
        &self.language
    }
}

/// The language and gender a caller would like a voice to have.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceRequest {
    /// Language tag, e.g. `fr-FR`. Matched case-insensitively.
    pub language: String,
    /// Preferred gender of the voice.
    pub gender: VoiceGender,
}

impl VoiceRequest {
    /// Creates a new request.
    pub fn new<L: Into<String>>(language: L, gender: VoiceGender) -> Self {
        Self {
            language: language.into(),
            gender,
        }
    }
}

/// Describes which rule of the [`VoiceSelector`] picked a voice.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchTier {
    /// The voice's language tag contains the requested tag and its name suggests the requested
    /// gender.
    LanguageAndGender,
    /// The voice shares the primary language subtag and its name suggests the requested gender.
    PrefixAndGender,
    /// The voice shares the primary language subtag.
    Prefix,
    /// Nothing matched, so the first available voice was chosen.
    Fallback,
}

/// Picks the voice that best fits a [`VoiceRequest`].
///
/// The voices are scanned in a fixed series of tiers, from most to least specific. Each tier
/// scans the whole list in its original order and the first hit wins:
///
/// 1. The voice language contains the requested language tag and the voice name contains one of
///    the [keywords](VoiceGender::keywords) for the requested gender.
/// 2. The voice language starts with the requested primary subtag (`fr` for `fr-FR`) and the
///    name contains a gender keyword.
/// 3. The voice language starts with the requested primary subtag.
/// 4. The first voice in the list.
///
/// All comparisons are case-insensitive substring matches. Gender detection is a heuristic and
/// will misjudge unfamiliar names.
pub struct VoiceSelector<'r> {
    request: &'r VoiceRequest,
    language: String,
    prefix: String,
}

impl<'r> VoiceSelector<'r> {
    /// Prepares a selector for the given request.
    pub fn new(request: &'r VoiceRequest) -> Self {
        Self {
            request,
            language: request.language.to_lowercase(),
            prefix: primary_subtag(&request.language),
        }
    }

    /// Returns the best voice for the request, or `None` if the list is empty. `None` means the
    /// platform's default voice should be used.
    pub fn select<'v>(&self, voices: &'v [Voice]) -> Option<&'v Voice> {
        self.tier(voices).map(|(voice, _)| voice)
    }

    /// Like [`select`](Self::select), but also reports which tier produced the match.
    pub fn tier<'v>(&self, voices: &'v [Voice]) -> Option<(&'v Voice, MatchTier)> {
        let first = voices.first()?;
        let gender = self.request.gender;

        let found = voices
            .iter()
            .find(|v| {
                v.language.to_lowercase().contains(&self.language)
                    && gender.matches(&v.name.to_lowercase())
            })
            .map(|v| (v, MatchTier::LanguageAndGender))
            .or_else(|| {
                voices
                    .iter()
                    .find(|v| self.has_prefix(v) && gender.matches(&v.name.to_lowercase()))
                    .map(|v| (v, MatchTier::PrefixAndGender))
            })
            .or_else(|| voices.iter().find(|v| self.has_prefix(v)).map(|v| (v, MatchTier::Prefix)))
            .unwrap_or((first, MatchTier::Fallback));

        debug!(
            "selected voice {:?} ({}) for {} {} via {}",
            found.0.name,
            found.0.language,
            self.request.language,
            self.request.gender,
            <&str>::from(found.1)
        );
        Some(found)
    }

    fn has_prefix(&self, voice: &Voice) -> bool {
        voice.language.to_lowercase().starts_with(&self.prefix)
    }
}

/// Shorthand for `VoiceSelector::new(request).select(voices)`.
pub fn select_voice<'v>(voices: &'v [Voice], request: &VoiceRequest) -> Option<&'v Voice> {
    VoiceSelector::new(request).select(voices)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn voices(list: &[(&str, &str)]) -> Vec<Voice> {
        list.iter().map(|(name, lang)| Voice::new(*name, *lang)).collect()
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!(VoiceGender::from_str("FEMALE").unwrap(), VoiceGender::Female);
        assert_eq!(VoiceGender::from_str("male").unwrap(), VoiceGender::Male);
        assert!(VoiceGender::from_str("neutral").is_err());
        assert_eq!(VoiceGender::Female.to_string(), "female");
    }

    #[test]
    fn test_tiers() {
        let list = voices(&[
            ("Generic", "en-US"),
            ("Amelie", "fr-CA"),
            ("Thomas Male", "fr-CA"),
            ("Daniel", "en-GB"),
        ]);

        let pick = |lang: &str, gender| {
            VoiceSelector::new(&VoiceRequest::new(lang, gender))
                .tier(&list)
                .map(|(v, tier)| (v.name().to_string(), tier))
        };

        assert_eq!(
            pick("en-GB", VoiceGender::Male),
            Some(("Daniel".into(), MatchTier::LanguageAndGender))
        );
        assert_eq!(
            pick("fr-FR", VoiceGender::Male),
            Some(("Thomas Male".into(), MatchTier::PrefixAndGender))
        );
        assert_eq!(pick("fr-FR", VoiceGender::Female), Some(("Amelie".into(), MatchTier::Prefix)));
        assert_eq!(
            pick("ja-JP", VoiceGender::Female),
            Some(("Generic".into(), MatchTier::Fallback))
        );
    }

    #[test]
    fn test_language_is_case_insensitive() {
        let list = voices(&[("Other", "de-DE"), ("Karen", "EN-au")]);
        let request = VoiceRequest::new("en-AU", VoiceGender::Female);
        assert_eq!(select_voice(&list, &request).map(Voice::name), Some("Karen"));
    }

    #[test]
    fn test_keywords_are_substrings() {
        // "female" contains "male", so a male request accepts a female-named voice.
        let list = voices(&[("Google Female", "en-US")]);
        let (_, tier) = VoiceSelector::new(&VoiceRequest::new("en-US", VoiceGender::Male))
            .tier(&list)
            .unwrap();
        assert_eq!(tier, MatchTier::LanguageAndGender);
    }

    #[test]
    fn test_empty() {
        let request = VoiceRequest::new("en-US", VoiceGender::Female);
        assert!(select_voice(&[], &request).is_none());
    }
}
