/// The instruction template sent to the generative model.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains a `{{TRANSCRIPT}}` placeholder that is replaced with the
/// transcript text by [`build_prompt`].
pub const RECIPE_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

const TRANSCRIPT_PLACEHOLDER: &str = "{{TRANSCRIPT}}";

/// Injects the transcript verbatim into the prompt template.
pub fn build_prompt(transcript: &str) -> String {
    RECIPE_EXTRACTION_PROMPT.replace(TRANSCRIPT_PLACEHOLDER, transcript)
}
