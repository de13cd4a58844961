//! Query intent resolution.
//!
//! Turns a raw natural-language query into a [`QueryIntent`] via an external
//! language model. Resolution is total: any failure, from an unreachable
//! model to malformed JSON, degrades to the identity fallback instead of
//! erroring out of the search path.

pub mod gemini;
pub mod prompt;
pub mod resolver;

pub use gemini::GeminiGenerator;
pub use resolver::IntentResolver;
