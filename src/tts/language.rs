//! Helpers for working with BCP 47 language tags such as `en-US`.

/// The language tag used when a request does not specify one.
pub const DEFAULT_LANGUAGE: &str = "en-US";

const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("en-US", "English (US)"),
    ("en-GB", "English (UK)"),
    ("en-AU", "English (Australia)"),
    ("en-IN", "English (India)"),
    ("es-ES", "Spanish"),
    ("fr-FR", "French"),
    ("de-DE", "German"),
    ("it-IT", "Italian"),
    ("pt-BR", "Portuguese"),
    ("ja-JP", "Japanese"),
    ("ko-KR", "Korean"),
    ("zh-CN", "Chinese"),
];

/// Returns the primary subtag of the given language tag, i.e. everything before the first `-`,
/// lower-cased. For example, `"en-US"` yields `"en"`.
pub fn primary_subtag(tag: &str) -> String {
    tag.split('-').next().unwrap_or_default().to_lowercase()
}

/// Returns a human-readable name for the given language tag. Unknown tags are returned as-is.
pub fn display_name(tag: &str) -> &str {
    DISPLAY_NAMES
        .iter()
        .find(|(code, _)| *code == tag)
        .map(|(_, name)| *name)
        .unwrap_or(tag)
}
