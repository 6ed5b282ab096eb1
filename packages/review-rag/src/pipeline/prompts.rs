//! LLM prompt for answering questions from retrieved reviews.

use sha2::{Digest, Sha256};

/// Marker placed before the retrieved reviews.
pub const REVIEWS_BEGIN: &str = "BEGIN REVIEWS";

/// Marker placed after the retrieved reviews.
pub const REVIEWS_END: &str = "END REVIEWS";

/// Guideline: repetition across reviews signals what is representative.
pub const GUIDELINE_REPETITION: &str = "If something is mentioned in multiple reviews, it is important and more likely to be preferred in the answer.";

/// Guideline: food and drink places should be answered with named items.
pub const GUIDELINE_SPECIFIC_ITEMS: &str = "If the reviews are of a restaurant, bar, or any food establishment, use specific names of dishes, drinks, and desserts.";

/// Prompt for answering a question grounded in customer reviews.
pub const ANSWER_PROMPT: &str = r#"The following are customer reviews of a business:

{reviews_begin}

{context}

{reviews_end}

Answer the following question based on the reviews: {question}

Follow the guidelines below when answering the question:
1. {guideline_repetition}
2. {guideline_specific_items}
"#;

/// Generate a hash of the answer prompt, logged with each completion.
pub fn answer_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(ANSWER_PROMPT.as_bytes());
    hasher.update(REVIEWS_BEGIN.as_bytes());
    hasher.update(REVIEWS_END.as_bytes());
    hasher.update(GUIDELINE_REPETITION.as_bytes());
    hasher.update(GUIDELINE_SPECIFIC_ITEMS.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Join retrieved review texts into the context block, separated by blank lines.
pub fn format_context<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format the answer prompt with retrieved reviews and the question.
///
/// Placeholders are filled in one pass, so braces inside reviews or the
/// question are copied through untouched.
pub fn format_answer_prompt<S: AsRef<str>>(question: &str, texts: &[S]) -> String {
    let context = format_context(texts);
    fill_template(
        ANSWER_PROMPT,
        &[
            ("{reviews_begin}", REVIEWS_BEGIN),
            ("{context}", context.as_str()),
            ("{reviews_end}", REVIEWS_END),
            ("{question}", question),
            ("{guideline_repetition}", GUIDELINE_REPETITION),
            ("{guideline_specific_items}", GUIDELINE_SPECIFIC_ITEMS),
        ],
    )
}

fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match vars.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
