pub mod traits;

// External service implementations
pub mod gemini;
