//! Style calibration: maps profile tags (store type, personality, speaking style,
//! experience) to the canned wording descriptors used in prompts.
//!
//! Every lookup is total: unset, empty or unknown tags resolve to the fallback
//! entry, so callers can read fields off the result unconditionally.

// ────────────────────────────────────────────────────────────────────────────
// Store type
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Cabaret,
    Snack,
    Bar,
    Lounge,
    Club,
    Other,
}

/// Canned phrases and atmosphere for a category of venue.
#[derive(Debug, Clone)]
pub struct StoreProfile {
    pub terms: &'static [&'static str],
    pub greeting: &'static str,
    pub closing: &'static str,
    pub atmosphere: &'static str,
}

impl StoreType {
    pub const ALL: [StoreType; 6] = [
        StoreType::Cabaret,
        StoreType::Snack,
        StoreType::Bar,
        StoreType::Lounge,
        StoreType::Club,
        StoreType::Other,
    ];

    /// Parses a stored tag. Unknown or blank tags resolve to `Other`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("cabaret") => StoreType::Cabaret,
            Some("snack") => StoreType::Snack,
            Some("bar") => StoreType::Bar,
            Some("lounge") => StoreType::Lounge,
            Some("club") => StoreType::Club,
            _ => StoreType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreType::Cabaret => "cabaret",
            StoreType::Snack => "snack",
            StoreType::Bar => "bar",
            StoreType::Lounge => "lounge",
            StoreType::Club => "club",
            StoreType::Other => "other",
        }
    }

    pub fn profile(&self) -> &'static StoreProfile {
        match self {
            StoreType::Cabaret => &CABARET,
            StoreType::Snack => &SNACK,
            StoreType::Bar => &BAR,
            StoreType::Lounge => &LOUNGE,
            StoreType::Club => &CLUB,
            StoreType::Other => &OTHER_STORE,
        }
    }
}

static CABARET: StoreProfile = StoreProfile {
    terms: &["お席につかせていただき", "お時間をいただき", "お話しさせていただき"],
    greeting: "いらっしゃいませ！今夜もお疲れ様です",
    closing: "お時間をありがとうございました。また遊びに来てくださいね",
    atmosphere: "キャバクラらしい華やかで親しみやすい雰囲気",
};

static SNACK: StoreProfile = StoreProfile {
    terms: &["ゆっくりしていただき", "お付き合いいただき", "お時間を過ごしていただき"],
    greeting: "お疲れ様です！今日もいらしてくださって",
    closing: "今夜もありがとうございました。またお待ちしています",
    atmosphere: "スナックらしいアットホームで温かい雰囲気",
};

static BAR: StoreProfile = StoreProfile {
    terms: &[
        "お飲み物を楽しんでいただき",
        "カウンターでお話しいただき",
        "お酒を味わっていただき",
    ],
    greeting: "いらっしゃいませ。今夜もお疲れ様でした",
    closing: "お気をつけてお帰りください。またお待ちしております",
    atmosphere: "バーらしい落ち着いた大人の雰囲気",
};

static LOUNGE: StoreProfile = StoreProfile {
    terms: &[
        "優雅なお時間をお過ごしいただき",
        "ゆったりとお話しいただき",
        "上質な時間を共有させていただき",
    ],
    greeting: "いらっしゃいませ。本日もお疲れ様でございます",
    closing: "素敵なお時間をありがとうございました。またお越しください",
    atmosphere: "ラウンジらしい上品で洗練された雰囲気",
};

static CLUB: StoreProfile = StoreProfile {
    terms: &[
        "特別なお時間をお過ごしいただき",
        "贅沢な時間を共有させていただき",
        "至福のひとときをお楽しみいただき",
    ],
    greeting: "いらっしゃいませ。今宵もお疲れ様でございます",
    closing: "貴重なお時間をありがとうございました。またのお越しをお待ちしております",
    atmosphere: "クラブらしい高級感あふれる特別な雰囲気",
};

static OTHER_STORE: StoreProfile = StoreProfile {
    terms: &["お時間をいただき", "お付き合いいただき", "お話しさせていただき"],
    greeting: "いらっしゃいませ！お疲れ様です",
    closing: "ありがとうございました。また遊びに来てくださいね",
    atmosphere: "親しみやすく温かい雰囲気",
};

// ────────────────────────────────────────────────────────────────────────────
// Personality
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalityType {
    Bright,
    Calm,
    Friendly,
    Mature,
    Cute,
    Intellectual,
}

#[derive(Debug, Clone)]
pub struct PersonalityProfile {
    pub tone: &'static str,
    pub expressions: &'static [&'static str],
    pub emoji_style: &'static str,
}

impl PersonalityType {
    pub const ALL: [PersonalityType; 6] = [
        PersonalityType::Bright,
        PersonalityType::Calm,
        PersonalityType::Friendly,
        PersonalityType::Mature,
        PersonalityType::Cute,
        PersonalityType::Intellectual,
    ];

    /// Parses a stored tag. Unknown or blank tags resolve to `Friendly`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("bright") => PersonalityType::Bright,
            Some("calm") => PersonalityType::Calm,
            Some("mature") => PersonalityType::Mature,
            Some("cute") => PersonalityType::Cute,
            Some("intellectual") => PersonalityType::Intellectual,
            _ => PersonalityType::Friendly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityType::Bright => "bright",
            PersonalityType::Calm => "calm",
            PersonalityType::Friendly => "friendly",
            PersonalityType::Mature => "mature",
            PersonalityType::Cute => "cute",
            PersonalityType::Intellectual => "intellectual",
        }
    }

    pub fn profile(&self) -> &'static PersonalityProfile {
        match self {
            PersonalityType::Bright => &BRIGHT,
            PersonalityType::Calm => &CALM,
            PersonalityType::Friendly => &FRIENDLY,
            PersonalityType::Mature => &MATURE,
            PersonalityType::Cute => &CUTE,
            PersonalityType::Intellectual => &INTELLECTUAL,
        }
    }
}

static BRIGHT: PersonalityProfile = PersonalityProfile {
    tone: "明るく元気で、エネルギッシュな表現",
    expressions: &["すごく嬉しい！", "本当にありがとう！", "楽しかった〜！"],
    emoji_style: "✨🌟😊💫",
};

static CALM: PersonalityProfile = PersonalityProfile {
    tone: "落ち着いていて上品で、エレガントな表現",
    expressions: &[
        "心から感謝いたします",
        "とても素敵なお時間でした",
        "温かいお気持ちに感動しました",
    ],
    emoji_style: "💕🌸✨",
};

static FRIENDLY: PersonalityProfile = PersonalityProfile {
    tone: "フレンドリーで親しみやすく、距離感の近い表現",
    expressions: &["本当にありがとう！", "嬉しすぎる〜！", "また絶対会おうね！"],
    emoji_style: "😊💕🎉",
};

static MATURE: PersonalityProfile = PersonalityProfile {
    tone: "大人っぽくクールで、洗練された表現",
    expressions: &[
        "ありがとうございます",
        "素晴らしい時間でした",
        "とても印象深いひとときでした",
    ],
    emoji_style: "✨💎🌹",
};

static CUTE: PersonalityProfile = PersonalityProfile {
    tone: "可愛らしく甘え上手で、愛嬌のある表現",
    expressions: &["ありがとう〜♡", "すっごく嬉しい！", "また会いたいな〜"],
    emoji_style: "💕😘🥰♡",
};

static INTELLECTUAL: PersonalityProfile = PersonalityProfile {
    tone: "知的で話し上手で、教養のある表現",
    expressions: &[
        "心より感謝申し上げます",
        "有意義な時間をありがとうございました",
        "深いお話ができて嬉しかったです",
    ],
    emoji_style: "✨📚💭",
};

// ────────────────────────────────────────────────────────────────────────────
// Speaking style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakingStyle {
    Standard,
    Kansai,
    Casual,
    Elegant,
    Natural,
}

#[derive(Debug, Clone)]
pub struct SpeakingPattern {
    pub style: &'static str,
    pub sample: &'static str,
}

impl SpeakingStyle {
    pub const ALL: [SpeakingStyle; 5] = [
        SpeakingStyle::Standard,
        SpeakingStyle::Kansai,
        SpeakingStyle::Casual,
        SpeakingStyle::Elegant,
        SpeakingStyle::Natural,
    ];

    /// Parses a stored tag. Unknown or blank tags resolve to `Standard`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("kansai") => SpeakingStyle::Kansai,
            Some("casual") => SpeakingStyle::Casual,
            Some("elegant") => SpeakingStyle::Elegant,
            Some("natural") => SpeakingStyle::Natural,
            _ => SpeakingStyle::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeakingStyle::Standard => "standard",
            SpeakingStyle::Kansai => "kansai",
            SpeakingStyle::Casual => "casual",
            SpeakingStyle::Elegant => "elegant",
            SpeakingStyle::Natural => "natural",
        }
    }

    pub fn pattern(&self) -> &'static SpeakingPattern {
        match self {
            SpeakingStyle::Standard => &STANDARD,
            SpeakingStyle::Kansai => &KANSAI,
            SpeakingStyle::Casual => &CASUAL,
            SpeakingStyle::Elegant => &ELEGANT,
            SpeakingStyle::Natural => &NATURAL,
        }
    }
}

static STANDARD: SpeakingPattern = SpeakingPattern {
    style: "標準語で丁寧な敬語を基調とした表現",
    sample: "ありがとうございました。とても嬉しかったです。",
};

static KANSAI: SpeakingPattern = SpeakingPattern {
    style: "関西弁を交えた親しみやすい表現",
    sample: "ほんまにありがとう！めっちゃ嬉しかったわ〜",
};

static CASUAL: SpeakingPattern = SpeakingPattern {
    style: "カジュアルで親しみやすい自然な表現",
    sample: "ありがとう！すごく楽しかった〜",
};

static ELEGANT: SpeakingPattern = SpeakingPattern {
    style: "上品でエレガントな美しい言葉遣い",
    sample: "ありがとうございます。心から感謝しております。",
};

static NATURAL: SpeakingPattern = SpeakingPattern {
    style: "自然体で素朴な飾らない表現",
    sample: "ありがとうございました。本当に嬉しかったです。",
};

// ────────────────────────────────────────────────────────────────────────────
// Resolution helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn resolve_store(tag: Option<&str>) -> &'static StoreProfile {
    StoreType::from_tag(tag).profile()
}

pub fn resolve_personality(tag: Option<&str>) -> &'static PersonalityProfile {
    PersonalityType::from_tag(tag).profile()
}

pub fn resolve_speaking(tag: Option<&str>) -> &'static SpeakingPattern {
    SpeakingStyle::from_tag(tag).pattern()
}

/// Descriptor used when the profile carries no experience figure.
pub const DEFAULT_EXPERIENCE: &str = "適度な経験を持つ";

/// Maps years of experience onto the four descriptor bands.
pub fn experience_descriptor(years: Option<i32>) -> &'static str {
    match years {
        None => DEFAULT_EXPERIENCE,
        Some(y) if y < 1 => "新人らしい初々しさを持つ",
        Some(y) if y < 3 => DEFAULT_EXPERIENCE,
        Some(y) if y < 7 => "豊富な経験を持つベテランの",
        Some(_) => "長年の経験を持つプロフェッショナルな",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_fallback_is_other() {
        assert_eq!(StoreType::from_tag(None), StoreType::Other);
        assert_eq!(StoreType::from_tag(Some("")), StoreType::Other);
        assert_eq!(StoreType::from_tag(Some("karaoke")), StoreType::Other);
        assert_eq!(resolve_store(Some("nightclub")).atmosphere, "親しみやすく温かい雰囲気");
    }

    #[test]
    fn test_store_exact_match() {
        let lounge = resolve_store(Some("lounge"));
        assert_eq!(lounge.atmosphere, "ラウンジらしい上品で洗練された雰囲気");
        assert_eq!(lounge.terms.len(), 3);
    }

    #[test]
    fn test_personality_fallback_is_friendly() {
        assert_eq!(PersonalityType::from_tag(None), PersonalityType::Friendly);
        assert_eq!(
            resolve_personality(Some("grumpy")).tone,
            "フレンドリーで親しみやすく、距離感の近い表現"
        );
    }

    #[test]
    fn test_speaking_fallback_is_standard() {
        assert_eq!(SpeakingStyle::from_tag(Some("  ")), SpeakingStyle::Standard);
        assert_eq!(
            resolve_speaking(None).style,
            "標準語で丁寧な敬語を基調とした表現"
        );
        assert_eq!(
            resolve_speaking(Some("kansai")).style,
            "関西弁を交えた親しみやすい表現"
        );
    }

    #[test]
    fn test_tags_round_trip_through_as_str() {
        for s in StoreType::ALL {
            assert_eq!(StoreType::from_tag(Some(s.as_str())), s);
        }
        for p in PersonalityType::ALL {
            assert_eq!(PersonalityType::from_tag(Some(p.as_str())), p);
        }
        for s in SpeakingStyle::ALL {
            assert_eq!(SpeakingStyle::from_tag(Some(s.as_str())), s);
        }
    }

    #[test]
    fn test_every_profile_is_populated() {
        for s in StoreType::ALL {
            let p = s.profile();
            assert!(!p.terms.is_empty() && !p.greeting.is_empty() && !p.closing.is_empty());
        }
        for p in PersonalityType::ALL {
            assert!(!p.profile().emoji_style.is_empty());
        }
    }

    #[test]
    fn test_experience_bands() {
        assert_eq!(experience_descriptor(Some(0)), "新人らしい初々しさを持つ");
        assert_eq!(experience_descriptor(Some(1)), "適度な経験を持つ");
        assert_eq!(experience_descriptor(Some(2)), "適度な経験を持つ");
        assert_eq!(experience_descriptor(Some(3)), "豊富な経験を持つベテランの");
        assert_eq!(experience_descriptor(Some(6)), "豊富な経験を持つベテランの");
        assert_eq!(experience_descriptor(Some(7)), "長年の経験を持つプロフェッショナルな");
        assert_eq!(experience_descriptor(Some(25)), "長年の経験を持つプロフェッショナルな");
    }

    #[test]
    fn test_missing_experience_is_moderate() {
        assert_eq!(experience_descriptor(None), DEFAULT_EXPERIENCE);
    }
}
