// Static prompt text for message generation.
// Section bodies that interpolate profile data are assembled in prompt_builder.rs.

/// Opening instruction following the character setting.
pub const INTRO: &str = "以下の情報を基に、メッセージを作成してください。";

/// Workplace wording used when no store type has been chosen.
pub const DEFAULT_WORKPLACE: &str = "夜職（ホステス、キャバクラ、スナック、バー等）";

/// Short workplace label for section headers and the character sentence.
pub const SHORT_WORKPLACE: &str = "夜職";

/// Placeholder for customer fields that have not been filled in.
pub const NOT_REGISTERED: &str = "未登録";

/// Fallback when the profile lists no specialty topics.
pub const DEFAULT_SPECIALTY_TOPICS: &str = "様々な話題";

/// Personal-style line used when the user has no profile.
pub const GENERIC_STYLE_LINE: &str = "- 一般的な夜職の女性らしい親しみやすい表現を使用";

pub const GENERIC_EMOJI: &str = "😊、💕、✨、🌟";
pub const GENERIC_GREETING_RULE: &str = "温かい挨拶表現";
pub const GENERIC_CLOSING_RULE: &str = "配慮のある表現";
pub const GENERIC_TERMS: &str = "お時間をいただき、お付き合いいただき";
pub const GENERIC_FOCUS: &str = "夜職特有の親しみやすさ";

pub const LENGTH_GUIDANCE: &str = "200-300文字程度で読みやすい文章";

/// Static lines closing the store-rule section.
pub const STORE_RULE_FOOTER: &str = "\
- 段落分けを意識して見やすく
- 過度にフォーマルな表現は避ける（「敬具」「拝啓」などは使用しない）";

/// Before/after examples for turning raw input into natural phrasing.
pub const TRANSFORMATION_EXAMPLES: &str = "\
- 例：
  - 入力：「商品を購入した」→ 変換：「素敵な商品をお選びいただき」
  - 入力：「長時間お付き合いいただいた」→ 変換：「長い時間お付き合いいただき」
  - 入力：「お酒をたくさん飲んでくれた」→ 変換：「お酒をたくさん楽しんでいただき」";

/// Customer-history guidance when registered customer data is available.
pub const HISTORY_GUIDANCE_WITH_CONTEXT: &str = "\
- 過去の会話履歴・話題を参考に、より親しみやすい話題を含める
- 重要な会話・特記事項に記載された内容を考慮する
- 誕生日や記念日がある場合は、それらを意識した温かいメッセージにする
- 過去の関係性に応じて適切な敬語レベルを調整する";

/// Customer-history guidance when no customer data is available.
pub const HISTORY_GUIDANCE_WITHOUT_CONTEXT: &str =
    "- お客様の会話履歴が登録されていないため、一般的な親しみやすい表現を使用する";

/// "What happened" text used when generating from notes.
pub const NOTES_WHAT_HAPPENED: &str = "メモの内容に基づいてメッセージを作成";

/// Extra restrictions appended when the message is generated from notes only.
pub const NOTES_ONLY_RESTRICTIONS: &str = "\
- メモに記載されていない情報は一切使用しないでください
- お客様の職業、会社名、家族構成、趣味、誕生日などは、メモに明記されていない限り言及しないでください
- メモの内容のみに基づいてメッセージを作成してください
- 推測や想像による情報追加は絶対に行わないでください
- メモに書かれていない詳細な個人情報は含めないでください
- 関係性レベルはメモ内容から自動判定されますが、メモにない関係性の詳細は推測しないでください";

/// Notice attached to messages rendered from templates instead of Gemini.
pub const MOCK_NOTICE: &str = "※ これはモックメッセージです。実際のGemini APIキーを設定すると、より適切なメッセージが生成されます。";
