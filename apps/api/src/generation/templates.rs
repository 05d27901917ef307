//! Canned message templates, used for previews and when no Gemini key is configured.

use crate::generation::labels::{MessageType, Tone};

pub const DEFAULT_PREVIEW_CUSTOMER: &str = "田中太郎";
pub const DEFAULT_PREVIEW_EVENT: &str = "商品をご購入いただき";
/// Event text for template messages generated from notes, which have no event field.
pub const NOTES_TEMPLATE_EVENT: &str = "素敵なお時間をいただき";

const CUSTOMER_PLACEHOLDER: &str = "[お客様名]";
const EVENT_PLACEHOLDER: &str = "[出来事]";

/// Raw template for a (type, tone) pair.
pub fn template_for(message_type: MessageType, tone: Tone) -> &'static str {
    use MessageType::*;
    use Tone::*;

    match (message_type, tone) {
        (Thanks, Polite) => "[お客様名]様\n\nこの度は[出来事]いただき、誠にありがとうございました。\n\nお客様のご厚意に深く感謝申し上げます。今後ともよろしくお願いいたします。",
        (Thanks, Friendly) => "[お客様名]さん\n\n[出来事]いただき、本当にありがとうございました！\n\nお客様の温かいお気持ちがとても嬉しかったです。これからもよろしくお願いします。\n\nありがとうございました！",
        (Thanks, Formal) => "[お客様名]様\n\nこの度は[出来事]いただき、心より感謝申し上げます。\n\nお客様のご厚情に深く感謝いたします。今後ともご指導ご鞭撻を賜りますよう、よろしくお願い申し上げます。",
        (Thanks, Casual) => "[お客様名]さん\n\n[出来事]いただき、ありがとうございました！\n\n本当に助かりました。これからもよろしくお願いします。\n\nまた近いうちに！",

        (FollowUp, Polite) => "[お客様名]様\n\n先日は[出来事]いただき、ありがとうございました。\n\n引き続きご支援いただけますよう、よろしくお願いいたします。",
        (FollowUp, Friendly) => "[お客様名]さん\n\n先日は[出来事]いただき、ありがとうございました！\n\nまた機会があれば、よろしくお願いします。\n\nありがとうございました！",
        (FollowUp, Formal) => "[お客様名]様\n\n先日は[出来事]いただき、心より感謝申し上げます。\n\n今後ともご指導ご鞭撻を賜りますよう、よろしくお願い申し上げます。",
        (FollowUp, Casual) => "[お客様名]さん\n\n先日は[出来事]いただき、ありがとうございました！\n\nまた近いうちに！\n\nありがとう！",

        (Appreciation, Polite) => "[お客様名]様\n\n[出来事]いただき、心より感謝申し上げます。\n\nお客様のご厚情に深く感謝いたします。今後ともよろしくお願いいたします。",
        (Appreciation, Friendly) => "[お客様名]さん\n\n[出来事]いただき、本当にありがとうございます！\n\nお客様の温かいお気持ちがとても嬉しいです。これからもよろしくお願いします。\n\nありがとうございました！",
        (Appreciation, Formal) => "[お客様名]様\n\n[出来事]いただき、深く感謝申し上げます。\n\nお客様のご厚情に深く感謝いたします。今後ともご指導ご鞭撻を賜りますよう、よろしくお願い申し上げます。",
        (Appreciation, Casual) => "[お客様名]さん\n\n[出来事]いただき、ありがとうございます！\n\n本当に助かっています。これからもよろしくお願いします。\n\nありがとう！",

        (Celebration, Polite) => "[お客様名]様\n\n[出来事]、心よりお祝い申し上げます。\n\nお客様のご成功を心より祝福いたします。今後ともよろしくお願いいたします。",
        (Celebration, Friendly) => "[お客様名]さん\n\n[出来事]、おめでとうございます！\n\n本当に嬉しいです。これからもよろしくお願いします。\n\nおめでとうございました！",
        (Celebration, Formal) => "[お客様名]様\n\n[出来事]、心よりお祝い申し上げます。\n\nお客様のご成功を心より祝福いたします。今後ともご指導ご鞭撻を賜りますよう、よろしくお願い申し上げます。",
        (Celebration, Casual) => "[お客様名]さん\n\n[出来事]、おめでとうございます！\n\n本当に嬉しいです。これからもよろしくお願いします。\n\nおめでとう！",
    }
}

/// Fills a template. Blank arguments fall back to the preview defaults.
pub fn render_template(
    message_type: MessageType,
    tone: Tone,
    customer_name: &str,
    what_happened: &str,
) -> String {
    let customer = Some(customer_name.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PREVIEW_CUSTOMER);
    let event = Some(what_happened.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PREVIEW_EVENT);
    let event = if appends_itadaki(message_type) {
        strip_event_suffix(event)
    } else {
        event
    };

    template_for(message_type, tone)
        .replace(CUSTOMER_PLACEHOLDER, customer)
        .replace(EVENT_PLACEHOLDER, event)
}

/// Whether the type's templates follow the event with いただき.
fn appends_itadaki(message_type: MessageType) -> bool {
    !matches!(message_type, MessageType::Celebration)
}

/// Drops a trailing いただき from input so "ご来店いただき" does not render as
/// "ご来店いただきいただき".
fn strip_event_suffix(event: &str) -> &str {
    event.strip_suffix("いただき").unwrap_or(event)
}
