// Shared prompt fragments used by every writer backend.
// Message-specific prompt text lives in generation/prompts.rs.

/// Preamble placed ahead of every assembled prompt sent to Gemini.
pub const WRITER_PREAMBLE: &str = "あなたは親切で丁寧なビジネスメッセージを作成する専門家です。\
    以下の指示に従ってメッセージを作成してください。";

/// Joins the preamble and an assembled prompt into the final request text.
pub fn with_preamble(prompt: &str) -> String {
    format!("{WRITER_PREAMBLE}\n\n{}", prompt.trim_start())
}
