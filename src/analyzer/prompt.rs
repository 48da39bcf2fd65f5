//! Prompt construction for structured analysis

use crate::analyzer::schema::SchemaVersion;

/// Cut `text` to at most `max_chars` characters.
///
/// A hard cutoff on character boundaries; text at or under the budget is returned as is.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Build the single user prompt sent to the model
///
/// # Arguments
///
/// * `schema` - The response shape to request
/// * `original_title` - The document's own title, if known
/// * `text` - The document text, already truncated
pub fn build_prompt(schema: SchemaVersion, original_title: Option<&str>, text: &str) -> String {
    let mut prompt = String::from(
        "Analyze the following blog post text and extract metadata into a strict JSON object.\n\
         Respond with JSON only, using exactly the keys below.\n\n",
    );

    prompt.push_str("Output Structure:\n");
    prompt.push_str(&schema.describe());
    prompt.push_str("\n\n");

    if let Some(title) = original_title {
        prompt.push_str("ORIGINAL TITLE: ");
        prompt.push_str(title);
        prompt.push_str("\n\n");
    }

    prompt.push_str("TEXT CONTENT:\n");
    prompt.push_str(text);
    prompt
}
