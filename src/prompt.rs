use crate::models::FormState;

pub const HASHTAG_GUIDELINE: &str = "- Suggest 3-5 trending hashtags relevant to the topic.";

/// Build the caption instruction sent to the model.
///
/// Callers are responsible for rejecting a blank context first.
pub fn build_prompt(form: &FormState) -> String {
    let platform = form.platform;
    let mut prompt = format!(
        "You are an expert in social media marketing. Generate an engaging, catchy caption based on:\n\
         - **Context:** {context}\n\
         - **Mood:** {mood}\n\
         - **Platform:** {platform}\n\
         - **Hashtags:** {hashtags}\n\
         \n\
         **Guidelines:**\n\
         - Make the caption resonate with {platform} users.\n\
         - Keep it concise, engaging, and relevant.\n\
         - Use appropriate emojis.",
        context = form.context,
        mood = form.mood,
        hashtags = if form.include_hashtags { "Yes" } else { "No" },
    );

    if form.include_hashtags {
        prompt.push('\n');
        prompt.push_str(HASHTAG_GUIDELINE);
    }

    prompt
}
