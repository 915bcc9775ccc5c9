use crate::models::SplitResponse;

pub const THINK_OPEN: &str = "<think>";
pub const THINK_CLOSE: &str = "</think>";
pub const NO_THOUGHTS_PLACEHOLDER: &str = "No additional thoughts generated.";

/// Separate the model's reasoning trace from the caption.
///
/// The boundary is the first `</think>`; any later markers stay in the caption.
/// When nothing follows the marker the caption falls back to the whole response.
pub fn split_response(raw: &str) -> SplitResponse {
    match raw.split_once(THINK_CLOSE) {
        Some((thinking, caption)) => {
            let caption = caption.trim();
            SplitResponse {
                thinking: thinking.replace(THINK_OPEN, "").trim().to_string(),
                caption: if caption.is_empty() {
                    raw.trim().to_string()
                } else {
                    caption.to_string()
                },
            }
        }
        None => SplitResponse {
            thinking: NO_THOUGHTS_PLACEHOLDER.to_string(),
            caption: raw.trim().to_string(),
        },
    }
}
