use pictone_voice::tts::{select_voice, MatchTier, Voice, VoiceGender, VoiceRequest, VoiceSelector};

fn voice(name: &str, language: &str) -> Voice {
    Voice::new(name, language)
}

fn installed() -> Vec<Voice> {
    vec![
        voice("Google Deutsch", "de-DE"),
        voice("Alex", "en-US"),
        voice("Microsoft David", "en-US"),
        voice("Samantha", "en-US"),
        voice("Karen", "en-AU"),
        voice("Thomas", "fr-FR"),
        voice("Google français", "fr-FR"),
        voice("Kyoko", "ja-JP"),
    ]
}

#[test]
fn test_empty_list() {
    for gender in [VoiceGender::Female, VoiceGender::Male] {
        assert!(select_voice(&[], &VoiceRequest::new("en-US", gender)).is_none());
        assert!(select_voice(&[], &VoiceRequest::new("", gender)).is_none());
    }
}

#[test]
fn test_exact_match_beats_earlier_voices() {
    let voices = vec![voice("Generic Male", "en-US"), voice("Microsoft Zira", "en-US")];
    let request = VoiceRequest::new("en-US", VoiceGender::Female);
    assert_eq!(select_voice(&voices, &request), Some(&voices[1]));
}

#[test]
fn test_fallback_to_first_voice() {
    let voices = vec![voice("Generic", "en-US")];
    let request = VoiceRequest::new("fr-FR", VoiceGender::Male);
    let (picked, tier) = VoiceSelector::new(&request).tier(&voices).unwrap();
    assert_eq!(picked, &voices[0]);
    assert_eq!(tier, MatchTier::Fallback);
}

#[test]
fn test_first_exact_match_wins() {
    let voices = installed();
    let request = VoiceRequest::new("EN-us", VoiceGender::Female);
    assert_eq!(select_voice(&voices, &request).map(Voice::name), Some("Samantha"));

    let request = VoiceRequest::new("en-US", VoiceGender::Male);
    assert_eq!(select_voice(&voices, &request).map(Voice::name), Some("Microsoft David"));
}

#[test]
fn test_keywords_match_inside_names() {
    // "samantha" contains "man", so it passes for a male voice.
    let voices = vec![voice("Alex", "en-US"), voice("Samantha", "en-US")];
    let request = VoiceRequest::new("en-US", VoiceGender::Male);
    let (picked, tier) = VoiceSelector::new(&request).tier(&voices).unwrap();
    assert_eq!(picked.name(), "Samantha");
    assert_eq!(tier, MatchTier::LanguageAndGender);
}

#[test]
fn test_regional_fallbacks() {
    let voices = installed();

    // No en-GB voices: a female English voice from another region is preferred.
    let request = VoiceRequest::new("en-GB", VoiceGender::Female);
    let (picked, tier) = VoiceSelector::new(&request).tier(&voices).unwrap();
    assert_eq!(picked.name(), "Samantha");
    assert_eq!(tier, MatchTier::PrefixAndGender);

    // No French voice has a gendered name, so the first French voice is used.
    let request = VoiceRequest::new("fr-CA", VoiceGender::Female);
    let (picked, tier) = VoiceSelector::new(&request).tier(&voices).unwrap();
    assert_eq!(picked.name(), "Thomas");
    assert_eq!(tier, MatchTier::Prefix);
}

#[test]
fn test_deterministic() {
    let voices = installed();
    for language in ["en-US", "en-GB", "fr-FR", "ja-JP", "ko-KR", ""] {
        for gender in [VoiceGender::Female, VoiceGender::Male] {
            let request = VoiceRequest::new(language, gender);
            let selector = VoiceSelector::new(&request);
            let first = selector.tier(&voices);
            for _ in 0..3 {
                assert_eq!(selector.tier(&voices), first);
            }
            assert!(first.is_some());
        }
    }
}
