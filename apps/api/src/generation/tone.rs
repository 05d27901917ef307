//! Tone adjustment: turns the user's stored preference for a tone into the
//! extra wording appended to the prompt's requirements line.

use crate::generation::labels::Tone;
use crate::models::analytics::TonePreferenceRow;

const EMPHASIZE: &str = "（このトーンはお気に入りです。雰囲気をしっかり出してください）";
const SOFTEN: &str = "（このトーンはあまり好まれていないため、控えめに調整してください）";

/// Adjustment text for a 1–5 preference score. Neutral scores add nothing.
pub fn adjustment_for_score(score: i16) -> &'static str {
    match score {
        4..=5 => EMPHASIZE,
        1..=2 => SOFTEN,
        _ => "",
    }
}

/// Picks the adjustment for `tone`, preferring caller-supplied text when it is non-blank.
pub fn resolve_tone_adjustment(
    explicit: Option<&str>,
    tone: Tone,
    preferences: &[TonePreferenceRow],
) -> String {
    if let Some(text) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return parenthesize(text);
    }

    preferences
        .iter()
        .find(|p| p.tone == tone.as_str())
        .map(|p| adjustment_for_score(p.preference_score).to_string())
        .unwrap_or_default()
}

/// Caller text is appended straight after the requirements sentence, so it gets the
/// same full-width parentheses as the derived adjustments.
fn parenthesize(text: &str) -> String {
    if text.starts_with('（') && text.ends_with('）') {
        text.to_string()
    } else {
        format!("（{text}）")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn pref(tone: Tone, score: i16) -> TonePreferenceRow {
        TonePreferenceRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            tone: tone.as_str().to_string(),
            preference_score: score,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(adjustment_for_score(5), EMPHASIZE);
        assert_eq!(adjustment_for_score(4), EMPHASIZE);
        assert_eq!(adjustment_for_score(3), "");
        assert_eq!(adjustment_for_score(2), SOFTEN);
        assert_eq!(adjustment_for_score(1), SOFTEN);
    }

    #[test]
    fn test_explicit_text_wins() {
        let prefs = vec![pref(Tone::Casual, 5)];
        let adj = resolve_tone_adjustment(Some(" 絵文字少なめ "), Tone::Casual, &prefs);
        assert_eq!(adj, "（絵文字少なめ）");
    }

    #[test]
    fn test_explicit_text_already_in_parentheses_is_kept() {
        let adj = resolve_tone_adjustment(Some("（短めに）"), Tone::Polite, &[]);
        assert_eq!(adj, "（短めに）");
    }

    #[test]
    fn test_blank_explicit_text_falls_back_to_preferences() {
        let prefs = vec![pref(Tone::Polite, 1), pref(Tone::Casual, 5)];
        assert_eq!(resolve_tone_adjustment(Some(""), Tone::Casual, &prefs), EMPHASIZE);
        assert_eq!(resolve_tone_adjustment(None, Tone::Polite, &prefs), SOFTEN);
    }

    #[test]
    fn test_no_preference_means_no_adjustment() {
        assert_eq!(resolve_tone_adjustment(None, Tone::Formal, &[]), "");
    }
}
