use thiserror::Error;

/// Props attribute holding text that is not valid JSON.
///
/// Malformed markup configuration is treated as a programming error: nothing in
/// this crate recovers from it, the error always reaches the caller.
#[derive(Error, Debug)]
#[error("`{attr}` is not valid JSON: {text}")]
pub struct ParseError {
    /// Attribute the text was read from.
    pub attr: String,
    /// The offending attribute value.
    pub text: String,
    #[source]
    pub source: serde_json::Error,
}
