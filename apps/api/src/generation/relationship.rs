//! Relationship level inference: classifies free-text notes onto the 1–5 closeness scale.
//!
//! Levels run from 1 (first visit, most formal) to 5 (close regular, most familiar).
//! The keyword sets are Japanese; notes in other languages fall through to the default.

/// Level used when nothing in the note matches.
pub const DEFAULT_RELATIONSHIP_LEVEL: u8 = 3;

/// Wording profile for one relationship level.
#[derive(Debug, Clone)]
pub struct RelationshipStyle {
    pub level: u8,
    pub name: &'static str,
    pub tone: &'static str,
    pub expressions: &'static [&'static str],
    pub formality: &'static str,
    pub emoji_frequency: &'static str,
}

/// Ordered 1..=5. Index with `level - 1`.
pub static RELATIONSHIP_LEVELS: [RelationshipStyle; 5] = [
    RelationshipStyle {
        level: 1,
        name: "はじめまして・初回",
        tone: "丁寧で礼儀正しく、距離感を保った表現",
        expressions: &["ありがとうございました", "お疲れ様でした", "またいらしてください"],
        formality: "とても丁寧な敬語",
        emoji_frequency: "控えめ（1-2個）",
    },
    RelationshipStyle {
        level: 2,
        name: "2-3回目・慣れてきた",
        tone: "丁寧だが親しみやすい表現",
        expressions: &["ありがとうございます！", "今日もお疲れ様でした", "また来てくださいね"],
        formality: "丁寧な敬語",
        emoji_frequency: "適度（2-3個）",
    },
    RelationshipStyle {
        level: 3,
        name: "顔馴染み・親しみやすい",
        tone: "親しみやすく温かい表現",
        expressions: &["いつもありがとうございます", "お疲れ様です", "また会えて嬉しいです"],
        formality: "親しみやすい丁寧語",
        emoji_frequency: "普通（3-4個）",
    },
    RelationshipStyle {
        level: 4,
        name: "常連・気軽に話せる",
        tone: "気軽で親しみやすい表現",
        expressions: &["いつもありがとう！", "今日も楽しかった", "また来てね"],
        formality: "カジュアルな丁寧語",
        emoji_frequency: "多め（4-5個）",
    },
    RelationshipStyle {
        level: 5,
        name: "仲の良い常連・特別な関係",
        tone: "フレンドリーで親密な表現",
        expressions: &["ありがとう〜！", "すごく楽しかった！", "また絶対会おうね"],
        formality: "親しい間柄の話し方",
        emoji_frequency: "豊富（5-6個）",
    },
];

/// Keyword sets checked from level 5 down to level 1. All entries are lowercase.
static LEVEL_KEYWORDS: [(u8, &[&str]); 5] = [
    (
        5,
        &[
            "仲の良い常連",
            "特別な関係",
            "仲良し",
            "親密",
            "絶対会おう",
            "すごく楽しい",
            "レベル5",
            "lv5",
            "level5",
        ],
    ),
    (
        4,
        &[
            "常連",
            "気軽に話せる",
            "いつも来る",
            "楽しかった",
            "気軽",
            "レベル4",
            "lv4",
            "level4",
        ],
    ),
    (
        3,
        &[
            "顔馴染み",
            "親しみやすい",
            "会えて嬉しい",
            "温かい",
            "馴染み",
            "レベル3",
            "lv3",
            "level3",
        ],
    ),
    (
        2,
        &["2回目", "3回目", "慣れてきた", "少し慣れた", "レベル2", "lv2", "level2"],
    ),
    (
        1,
        &[
            "はじめまして",
            "初回",
            "初対面",
            "初めて",
            "1回目",
            "レベル1",
            "lv1",
            "level1",
        ],
    ),
];

/// Infers a relationship level from note text.
///
/// Highest matching level wins; no match (or empty text) yields
/// [`DEFAULT_RELATIONSHIP_LEVEL`].
pub fn detect_relationship_level(note_text: &str) -> u8 {
    let content = note_text.to_lowercase();

    LEVEL_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| content.contains(k)))
        .map(|(level, _)| *level)
        .unwrap_or(DEFAULT_RELATIONSHIP_LEVEL)
}

/// Returns the explicit level when it is within 1..=5.
pub fn valid_level(level: Option<i64>) -> Option<u8> {
    level
        .filter(|l| (1..=5).contains(l))
        .map(|l| l as u8)
}

/// Looks up the wording profile for a level. Out-of-range levels map to the default.
pub fn relationship_style(level: u8) -> &'static RelationshipStyle {
    let level = if (1..=5).contains(&level) {
        level
    } else {
        DEFAULT_RELATIONSHIP_LEVEL
    };
    &RELATIONSHIP_LEVELS[(level - 1) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_note_defaults_to_level_3() {
        assert_eq!(detect_relationship_level(""), 3);
    }

    #[test]
    fn test_unrelated_text_defaults_to_level_3() {
        assert_eq!(detect_relationship_level("completely unrelated text"), 3);
        assert_eq!(detect_relationship_level("ワインの話で盛り上がった"), 3);
    }

    #[test]
    fn test_first_visit_is_level_1() {
        assert_eq!(detect_relationship_level("はじめまして、今日が初来店"), 1);
        assert_eq!(detect_relationship_level("初対面でした"), 1);
    }

    #[test]
    fn test_second_visit_is_level_2() {
        assert_eq!(detect_relationship_level("今日で2回目のご来店"), 2);
    }

    #[test]
    fn test_regular_is_level_4() {
        assert_eq!(detect_relationship_level("常連の佐藤さん"), 4);
    }

    #[test]
    fn test_highest_level_wins_over_lower_match() {
        // 仲良し (level 5) and 慣れてきた (level 2) both present
        assert_eq!(detect_relationship_level("慣れてきたけどもう仲良し"), 5);
    }

    #[test]
    fn test_level_5_phrase_containing_level_4_keyword_is_level_5() {
        // 仲の良い常連 contains 常連; level 5 is checked first
        assert_eq!(detect_relationship_level("仲の良い常連さん"), 5);
    }

    #[test]
    fn test_literal_level_tags_are_case_insensitive() {
        assert_eq!(detect_relationship_level("LV2"), 2);
        assert_eq!(detect_relationship_level("Level1 guest"), 1);
        assert_eq!(detect_relationship_level("レベル4"), 4);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let note = "顔馴染みのお客様、今日も楽しかった";
        let first = detect_relationship_level(note);
        for _ in 0..10 {
            assert_eq!(detect_relationship_level(note), first);
        }
        assert_eq!(first, 4);
    }

    #[test]
    fn test_exactly_five_ordered_levels() {
        assert_eq!(RELATIONSHIP_LEVELS.len(), 5);
        for (i, style) in RELATIONSHIP_LEVELS.iter().enumerate() {
            assert_eq!(style.level as usize, i + 1);
            assert!(!style.expressions.is_empty());
        }
    }

    #[test]
    fn test_valid_level_rejects_out_of_range() {
        assert_eq!(valid_level(Some(1)), Some(1));
        assert_eq!(valid_level(Some(5)), Some(5));
        assert_eq!(valid_level(Some(0)), None);
        assert_eq!(valid_level(Some(6)), None);
        assert_eq!(valid_level(Some(-2)), None);
        assert_eq!(valid_level(None), None);
    }

    #[test]
    fn test_relationship_style_out_of_range_uses_default() {
        assert_eq!(relationship_style(0).level, 3);
        assert_eq!(relationship_style(9).level, 3);
        assert_eq!(relationship_style(5).name, "仲の良い常連・特別な関係");
    }
}
