mod extractor;
mod prompt;
mod schema;

pub use extractor::{parse_recipe_object, strip_code_fence, RecipeExtractor};
pub use prompt::{build_prompt, RECIPE_EXTRACTION_PROMPT};
pub use schema::{
    validate, Difficulty, FieldViolation, Ingredient, SchemaReport, ValidationMode, RECIPE_KEYS,
};
