use serde::{Deserialize, Serialize};

/// Kind of message the user wants written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    #[serde(alias = "thank_you")]
    Thanks,
    FollowUp,
    Appreciation,
    Celebration,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Thanks => "thanks",
            MessageType::FollowUp => "follow_up",
            MessageType::Appreciation => "appreciation",
            MessageType::Celebration => "celebration",
        }
    }

    /// Japanese display label, as it appears in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            MessageType::Thanks => "お礼メッセージ",
            MessageType::FollowUp => "フォローアップ",
            MessageType::Appreciation => "感謝のメッセージ",
            MessageType::Celebration => "お祝いメッセージ",
        }
    }
}

/// Requested tone of the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Polite,
    Friendly,
    Formal,
    Casual,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Polite, Tone::Friendly, Tone::Formal, Tone::Casual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Polite => "polite",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
            Tone::Casual => "casual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Polite => "丁寧",
            Tone::Friendly => "フレンドリー",
            Tone::Formal => "フォーマル",
            Tone::Casual => "カジュアル",
        }
    }

    /// Parses a stored tone tag. Returns `None` for tags written by older clients.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Tone::ALL.into_iter().find(|t| t.as_str() == tag.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_accepts_thank_you_alias() {
        let t: MessageType = serde_json::from_str(r#""thank_you""#).unwrap();
        assert_eq!(t, MessageType::Thanks);
        let t: MessageType = serde_json::from_str(r#""follow_up""#).unwrap();
        assert_eq!(t, MessageType::FollowUp);
    }

    #[test]
    fn test_message_type_labels() {
        assert_eq!(MessageType::Thanks.label(), "お礼メッセージ");
        assert_eq!(MessageType::Celebration.label(), "お祝いメッセージ");
    }

    #[test]
    fn test_tone_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Tone::Casual).unwrap(), r#""casual""#);
        assert_eq!(Tone::Polite.label(), "丁寧");
    }

    #[test]
    fn test_tone_from_tag() {
        assert_eq!(Tone::from_tag("formal"), Some(Tone::Formal));
        assert_eq!(Tone::from_tag("professional"), None);
    }

    #[test]
    fn test_unknown_message_type_is_rejected() {
        let r: Result<MessageType, _> = serde_json::from_str(r#""birthday""#);
        assert!(r.is_err());
    }
}
