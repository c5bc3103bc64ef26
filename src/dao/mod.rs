/// Raw trivia API payload models.
pub mod models;
/// Error types shared by every trivia source backend.
pub mod source;
/// Trivia API access: the source abstraction and its HTTP implementation.
pub mod trivia_source;
