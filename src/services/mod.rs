pub mod gemini;
pub mod insight;
