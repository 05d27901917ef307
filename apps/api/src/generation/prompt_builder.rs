//! Personalized prompt assembly.
//!
//! Combines the relationship level, the resolved store / personality / speaking
//! profiles and the caller's customer data into one instruction string for the
//! text-generation service. Assembly is pure: no I/O, no shared state, and every
//! optional input has a fallback, so the functions here never fail.
//!
//! Sections are always emitted in this order:
//! character setting → customer info → what happened → personal style →
//! relationship → store rules → input transformation → customer history →
//! requirements → output format (→ notes-only restrictions).

use crate::generation::prompts::{
    DEFAULT_SPECIALTY_TOPICS, DEFAULT_WORKPLACE, GENERIC_CLOSING_RULE, GENERIC_EMOJI,
    GENERIC_FOCUS, GENERIC_GREETING_RULE, GENERIC_STYLE_LINE, GENERIC_TERMS,
    HISTORY_GUIDANCE_WITHOUT_CONTEXT, HISTORY_GUIDANCE_WITH_CONTEXT, INTRO, LENGTH_GUIDANCE,
    NOTES_ONLY_RESTRICTIONS, NOT_REGISTERED, SHORT_WORKPLACE, STORE_RULE_FOOTER,
    TRANSFORMATION_EXAMPLES,
};
use crate::generation::relationship::{
    detect_relationship_level, relationship_style, valid_level, RelationshipStyle,
};
use crate::generation::style::{
    experience_descriptor, resolve_personality, resolve_speaking, resolve_store,
    PersonalityProfile, SpeakingPattern, StoreProfile, StoreType, DEFAULT_EXPERIENCE,
};

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// The writer's self-description, as far as prompt assembly needs it.
/// Tags are raw strings; unknown values fall back during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub work_name: Option<String>,
    pub store_type: Option<String>,
    pub experience_years: Option<i32>,
    pub personality_type: Option<String>,
    pub speaking_style: Option<String>,
    pub specialty_topics: Option<String>,
}

/// Registered facts about the customer. Empty fields render as "not registered".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerContext {
    pub company: Option<String>,
    /// Past conversation topics.
    pub preferences: Option<String>,
    pub important_notes: Option<String>,
    pub birthday: Option<String>,
    pub anniversary: Option<String>,
}

/// Everything the assembler reads. Labels are already in display form.
#[derive(Debug, Clone, Default)]
pub struct PromptRequest<'a> {
    pub profile: Option<&'a UserProfile>,
    pub message_type_label: &'a str,
    pub tone_label: &'a str,
    pub customer_name: &'a str,
    pub what_happened: &'a str,
    pub customer_context: Option<&'a CustomerContext>,
    pub tone_adjustment: &'a str,
    pub note_content: Option<&'a str>,
    /// Used only when within 1..=5; otherwise the note content is classified.
    pub relationship_level: Option<i64>,
    /// Appends the notes-only restriction block.
    pub notes_only: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// Appends prompt sections in call order. Sections are separated by a blank line;
/// headed sections render as `【header】` followed by the body.
#[derive(Debug, Default)]
pub struct PromptBuilder {
    sections: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unheaded paragraph.
    pub fn paragraph(mut self, body: impl Into<String>) -> Self {
        self.sections.push(body.into());
        self
    }

    pub fn section(mut self, header: &str, body: impl AsRef<str>) -> Self {
        self.sections
            .push(format!("【{header}】\n{}", body.as_ref().trim_end()));
        self
    }

    pub fn build(self) -> String {
        let mut out = self.sections.join("\n\n");
        out.push('\n');
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Profiles resolved once per request and shared by every section.
struct Resolved<'a> {
    profile: Option<&'a UserProfile>,
    store: &'static StoreProfile,
    personality: &'static PersonalityProfile,
    speaking: &'static SpeakingPattern,
    relationship: &'static RelationshipStyle,
}

impl Resolved<'_> {
    /// True when the profile names a store type, even one that resolves to the fallback.
    fn has_store_type(&self) -> bool {
        self.profile
            .and_then(|p| p.store_type.as_deref())
            .is_some_and(|s| !s.trim().is_empty())
    }
}

/// Level used for a request: a valid explicit level, else the note classification.
pub fn effective_relationship_level(request: &PromptRequest<'_>) -> u8 {
    valid_level(request.relationship_level)
        .unwrap_or_else(|| detect_relationship_level(request.note_content.unwrap_or("")))
}

/// Assembles the full instruction string for one message.
pub fn generate_personalized_prompt(request: &PromptRequest<'_>) -> String {
    let profile = request.profile;
    let level = effective_relationship_level(request);

    let r = Resolved {
        profile,
        store: resolve_store(profile.and_then(|p| p.store_type.as_deref())),
        personality: resolve_personality(profile.and_then(|p| p.personality_type.as_deref())),
        speaking: resolve_speaking(profile.and_then(|p| p.speaking_style.as_deref())),
        relationship: relationship_style(level),
    };

    let mut builder = PromptBuilder::new()
        .paragraph(character_setting(&r))
        .paragraph(INTRO)
        .section("お客様情報", customer_info(request))
        .section("何があったか", request.what_happened)
        .section("あなたの特徴・スタイル", personal_style(&r))
        .section("お客様との関係性", relationship_section(r.relationship))
        .section(&store_rules_header(&r), store_rules(&r))
        .section("入力内容の自然な変換ルール", transformation_rules(&r))
        .section(
            "お客様情報の活用",
            if request.customer_context.is_some() {
                HISTORY_GUIDANCE_WITH_CONTEXT
            } else {
                HISTORY_GUIDANCE_WITHOUT_CONTEXT
            },
        )
        .section("要求", requirements(request, &r))
        .section("出力形式", output_format(&r));

    if request.notes_only {
        builder = builder.section("メモからの生成時の特別な制限事項", NOTES_ONLY_RESTRICTIONS);
    }

    builder.build()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn character_setting(r: &Resolved<'_>) -> String {
    let Some(profile) = r.profile else {
        return format!(
            "あなたは{DEFAULT_WORKPLACE}で働く{DEFAULT_EXPERIENCE}女性です。{}を心がけ、お客様との{}を大切にしています。",
            r.personality.tone, r.store.atmosphere
        );
    };

    // A named but unrecognised store type keeps the generic workplace wording.
    let workplace = match non_empty(profile.store_type.as_deref()) {
        Some(tag) if StoreType::from_tag(Some(tag)).as_str() == tag => r.store.atmosphere,
        _ => SHORT_WORKPLACE,
    };
    let alias = non_empty(profile.work_name.as_deref())
        .map(|name| format!("（{name}として）"))
        .unwrap_or_default();

    format!(
        "あなたは{workplace}で働く{}女性{alias}です。{}を心がけ、お客様との{}を大切にしています。",
        experience_descriptor(profile.experience_years),
        r.personality.tone,
        r.store.atmosphere
    )
}

fn customer_info(request: &PromptRequest<'_>) -> String {
    let mut out = format!("- お客様名: {}", request.customer_name);

    if let Some(ctx) = request.customer_context {
        let field = |v: &Option<String>| non_empty(v.as_deref()).unwrap_or(NOT_REGISTERED).to_string();
        out.push_str(&format!("\n- 会社: {}", field(&ctx.company)));
        out.push_str(&format!("\n- 過去の会話履歴: {}", field(&ctx.preferences)));
        out.push_str(&format!("\n- 重要な会話・特記事項: {}", field(&ctx.important_notes)));
        out.push_str(&format!("\n- 誕生日: {}", field(&ctx.birthday)));
        out.push_str(&format!("\n- 記念日: {}", field(&ctx.anniversary)));
    }

    out
}

fn personal_style(r: &Resolved<'_>) -> String {
    let Some(profile) = r.profile else {
        return GENERIC_STYLE_LINE.to_string();
    };

    format!(
        "- 性格・キャラクター: {}\n- 話し方: {}\n- 話し方の例: 「{}」\n- 得意な話題: {}\n- よく使う表現例: {}",
        r.personality.tone,
        r.speaking.style,
        r.speaking.sample,
        non_empty(profile.specialty_topics.as_deref()).unwrap_or(DEFAULT_SPECIALTY_TOPICS),
        r.personality.expressions.join("、"),
    )
}

fn relationship_section(style: &RelationshipStyle) -> String {
    format!(
        "- 関係性レベル: {}/5 ({})\n- 関係性に応じた表現: {}\n- 適切な敬語レベル: {}\n- 絵文字の使用頻度: {}\n- この関係性での典型的な表現: {}",
        style.level,
        style.name,
        style.tone,
        style.formality,
        style.emoji_frequency,
        style.expressions.join("、"),
    )
}

fn store_rules_header(r: &Resolved<'_>) -> String {
    let place = if r.has_store_type() {
        r.store.atmosphere
    } else {
        SHORT_WORKPLACE
    };
    format!("{place}向けの表現ルール")
}

fn emoji_examples(r: &Resolved<'_>) -> &'static str {
    if r.profile.is_some() {
        r.personality.emoji_style
    } else {
        GENERIC_EMOJI
    }
}

fn store_rules(r: &Resolved<'_>) -> String {
    let (greeting, closing, terms) = if r.profile.is_some() {
        (
            format!("「{}」のような挨拶表現", r.store.greeting),
            format!("「{}」のような配慮表現", r.store.closing),
            r.store.terms.join("、"),
        )
    } else {
        (
            GENERIC_GREETING_RULE.to_string(),
            GENERIC_CLOSING_RULE.to_string(),
            GENERIC_TERMS.to_string(),
        )
    };

    format!(
        "- 「〜さん」「〜ちゃん」などの親しみやすい呼び方を使用\n- 絵文字を適度に使用（{}）\n- {greeting}\n- {closing}\n- {terms}などの丁寧な表現\n- {LENGTH_GUIDANCE}\n{STORE_RULE_FOOTER}",
        emoji_examples(r)
    )
}

fn transformation_rules(r: &Resolved<'_>) -> String {
    format!(
        "- ユーザーが入力した「何があったか」の内容を、{speaking}で自然に変換してください\n- 入力内容をそのまま引用するのではなく、{tone}で実際に話すような自然な表現にしてください\n{TRANSFORMATION_EXAMPLES}\n- 入力内容の要点は保持しつつ、{tone}で温かい表現に変換してください",
        speaking = r.speaking.style,
        tone = r.personality.tone,
    )
}

fn requirements(request: &PromptRequest<'_>, r: &Resolved<'_>) -> String {
    let focus = if r.has_store_type() {
        r.store.atmosphere
    } else {
        GENERIC_FOCUS
    };

    format!(
        "- {}を作成\n- トーン: {}\n- 日本語で作成\n- {LENGTH_GUIDANCE}\n- {focus}と温かみを重視\n- お客様への配慮と感謝の気持ちを表現\n- {}で自然で親しみやすい文章{}\n- ユーザー入力内容を{}で自然な表現に変換してからメッセージに組み込む",
        request.message_type_label,
        request.tone_label,
        r.personality.tone,
        request.tone_adjustment.trim(),
        r.speaking.style,
    )
}

fn output_format(r: &Resolved<'_>) -> String {
    format!(
        "メッセージのみを出力してください。説明文は不要です。\n絵文字は適度に使用し（{}を参考に）、過度にならないようにしてください。\n入力内容をそのまま引用せず、{}で自然な表現に変換してから使用してください。\n{}を意識した、あなたらしいメッセージを作成してください。",
        emoji_examples(r),
        r.speaking.style,
        r.personality.tone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::relationship::RELATIONSHIP_LEVELS;

    fn base_request<'a>() -> PromptRequest<'a> {
        PromptRequest {
            profile: None,
            message_type_label: "お礼メッセージ",
            tone_label: "丁寧",
            customer_name: "田中様",
            what_happened: "ご来店いただき",
            customer_context: None,
            tone_adjustment: "",
            note_content: None,
            relationship_level: None,
            notes_only: false,
        }
    }

    fn lounge_profile() -> UserProfile {
        UserProfile {
            work_name: Some("あやか".to_string()),
            store_type: Some("lounge".to_string()),
            experience_years: Some(4),
            personality_type: Some("calm".to_string()),
            speaking_style: Some("elegant".to_string()),
            specialty_topics: Some("ワイン、旅行".to_string()),
        }
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let profile = lounge_profile();
        let ctx = CustomerContext {
            company: Some("山田商事".to_string()),
            ..Default::default()
        };
        let request = PromptRequest {
            profile: Some(&profile),
            customer_context: Some(&ctx),
            note_content: Some("常連さん"),
            ..base_request()
        };
        let first = generate_personalized_prompt(&request);
        let second = generate_personalized_prompt(&request);
        assert_eq!(first, second);
    }

    #[test]
    fn test_equal_values_give_equal_prompts() {
        let a = lounge_profile();
        let b = lounge_profile();
        let ra = PromptRequest {
            profile: Some(&a),
            ..base_request()
        };
        let rb = PromptRequest {
            profile: Some(&b),
            ..base_request()
        };
        assert_eq!(
            generate_personalized_prompt(&ra),
            generate_personalized_prompt(&rb)
        );
    }

    #[test]
    fn test_explicit_level_overrides_note_classification() {
        let request = PromptRequest {
            note_content: Some("仲良しの特別な関係"),
            relationship_level: Some(1),
            ..base_request()
        };
        assert_eq!(effective_relationship_level(&request), 1);

        let prompt = generate_personalized_prompt(&request);
        let level1 = &RELATIONSHIP_LEVELS[0];
        let level5 = &RELATIONSHIP_LEVELS[4];
        assert!(prompt.contains("関係性レベル: 1/5"));
        assert!(prompt.contains(level1.name));
        assert!(prompt.contains(level1.formality));
        assert!(!prompt.contains(level5.name));
        assert!(!prompt.contains(level5.formality));
    }

    #[test]
    fn test_out_of_range_override_falls_back_to_classifier() {
        let request = PromptRequest {
            note_content: Some("仲良し"),
            relationship_level: Some(9),
            ..base_request()
        };
        assert_eq!(effective_relationship_level(&request), 5);
    }

    #[test]
    fn test_missing_note_defaults_to_level_3() {
        let request = base_request();
        assert_eq!(effective_relationship_level(&request), 3);
        assert!(generate_personalized_prompt(&request).contains("関係性レベル: 3/5 (顔馴染み・親しみやすい)"));
    }

    #[test]
    fn test_no_profile_uses_fallback_descriptors() {
        let prompt = generate_personalized_prompt(&base_request());
        // other store
        assert!(prompt.contains("親しみやすく温かい雰囲気"));
        // friendly personality
        assert!(prompt.contains("フレンドリーで親しみやすく、距離感の近い表現"));
        // standard speaking style
        assert!(prompt.contains("標準語で丁寧な敬語を基調とした表現"));
        assert!(prompt.contains(GENERIC_STYLE_LINE));
        assert!(prompt.contains("【夜職向けの表現ルール】"));
        assert!(prompt.contains(GENERIC_TERMS));
    }

    #[test]
    fn test_customer_context_renders_not_registered_placeholders() {
        let ctx = CustomerContext {
            company: None,
            preferences: Some("ゴルフの話".to_string()),
            important_notes: Some("お酒は控えめ".to_string()),
            birthday: Some("1985年04月12日".to_string()),
            anniversary: Some("   ".to_string()),
        };
        let request = PromptRequest {
            customer_context: Some(&ctx),
            ..base_request()
        };
        let prompt = generate_personalized_prompt(&request);
        assert!(prompt.contains("- 会社: 未登録"));
        assert!(prompt.contains("- 過去の会話履歴: ゴルフの話"));
        assert!(prompt.contains("- 誕生日: 1985年04月12日"));
        assert!(prompt.contains("- 記念日: 未登録"));
        assert!(prompt.contains(HISTORY_GUIDANCE_WITH_CONTEXT));
    }

    #[test]
    fn test_without_customer_context_only_name_is_listed() {
        let prompt = generate_personalized_prompt(&base_request());
        assert!(prompt.contains("- お客様名: 田中様"));
        assert!(!prompt.contains("- 会社:"));
        assert!(prompt.contains(HISTORY_GUIDANCE_WITHOUT_CONTEXT));
    }

    #[test]
    fn test_first_meeting_scenario_uses_level_1_only() {
        let request = PromptRequest {
            note_content: Some("はじめまして"),
            ..base_request()
        };
        let prompt = generate_personalized_prompt(&request);

        let level1 = &RELATIONSHIP_LEVELS[0];
        assert!(prompt.contains("関係性レベル: 1/5 (はじめまして・初回)"));
        assert!(prompt.contains(level1.tone));
        assert!(prompt.contains(level1.formality));
        for other in [&RELATIONSHIP_LEVELS[2], &RELATIONSHIP_LEVELS[4]] {
            assert!(!prompt.contains(other.name));
            assert!(!prompt.contains(other.formality));
            assert!(!prompt.contains(other.emoji_frequency));
        }
        assert!(prompt.contains("- お礼メッセージを作成"));
        assert!(prompt.contains("- トーン: 丁寧"));
        assert!(prompt.contains("【何があったか】\nご来店いただき"));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let profile = lounge_profile();
        let request = PromptRequest {
            profile: Some(&profile),
            notes_only: true,
            ..base_request()
        };
        let prompt = generate_personalized_prompt(&request);
        let headers = [
            "【お客様情報】",
            "【何があったか】",
            "【あなたの特徴・スタイル】",
            "【お客様との関係性】",
            "向けの表現ルール】",
            "【入力内容の自然な変換ルール】",
            "【お客様情報の活用】",
            "【要求】",
            "【出力形式】",
            "【メモからの生成時の特別な制限事項】",
        ];
        let positions: Vec<usize> = headers
            .iter()
            .map(|h| prompt.find(h).unwrap_or_else(|| panic!("missing {h}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.starts_with("あなたは"));
    }

    #[test]
    fn test_profile_character_setting() {
        let profile = lounge_profile();
        let request = PromptRequest {
            profile: Some(&profile),
            ..base_request()
        };
        let prompt = generate_personalized_prompt(&request);
        assert!(prompt.starts_with(
            "あなたはラウンジらしい上品で洗練された雰囲気で働く豊富な経験を持つベテランの女性（あやかとして）です。"
        ));
        assert!(prompt.contains("- 得意な話題: ワイン、旅行"));
        assert!(prompt.contains("いらっしゃいませ。本日もお疲れ様でございます"));
        assert!(prompt.contains("💕🌸✨"));
        assert!(prompt.contains("上品でエレガントな美しい言葉遣い"));
    }

    #[test]
    fn test_blank_work_name_omits_alias() {
        let profile = UserProfile {
            work_name: Some("  ".to_string()),
            ..Default::default()
        };
        let request = PromptRequest {
            profile: Some(&profile),
            ..base_request()
        };
        let prompt = generate_personalized_prompt(&request);
        assert!(prompt.starts_with("あなたは夜職で働く適度な経験を持つ女性です。"));
        assert!(prompt.contains("- 得意な話題: 様々な話題"));
    }

    #[test]
    fn test_unknown_store_type_keeps_generic_workplace() {
        let profile = UserProfile {
            store_type: Some("karaoke".to_string()),
            ..Default::default()
        };
        let request = PromptRequest {
            profile: Some(&profile),
            ..base_request()
        };
        let prompt = generate_personalized_prompt(&request);
        assert!(prompt.starts_with("あなたは夜職で働く"));
        assert!(prompt.contains("お客様との親しみやすく温かい雰囲気を大切にしています。"));
    }

    #[test]
    fn test_tone_adjustment_is_appended_to_requirements() {
        let request = PromptRequest {
            tone_adjustment: "（絵文字は少なめに）",
            ..base_request()
        };
        let prompt = generate_personalized_prompt(&request);
        assert!(prompt.contains("距離感の近い表現で自然で親しみやすい文章（絵文字は少なめに）\n"));
    }

    #[test]
    fn test_notes_restrictions_only_when_requested() {
        let prompt = generate_personalized_prompt(&base_request());
        assert!(!prompt.contains(NOTES_ONLY_RESTRICTIONS));
        let prompt = generate_personalized_prompt(&PromptRequest {
            notes_only: true,
            ..base_request()
        });
        assert!(prompt.trim_end().ends_with(NOTES_ONLY_RESTRICTIONS));
    }

    #[test]
    fn test_builder_joins_sections_with_blank_lines() {
        let out = PromptBuilder::new()
            .paragraph("intro")
            .section("要求", "- a\n")
            .build();
        assert_eq!(out, "intro\n\n【要求】\n- a\n");
    }
}
