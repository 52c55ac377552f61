//! Error types for the action contract.
//!
//! Every way a user action can be refused lives in one enum. Callers
//! treat all of these as the same kind of failure (a bad action); the
//! variants exist so each refusal carries a distinct, stable message.

/// A user action was refused.
///
/// The first four variants are structural: the JSON did not match the
/// action contract. The rest are semantic: the structure was fine but
/// the content named the wrong API or asked for something impossible.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The value (or one of its required sub-objects) is not a JSON
    /// object.
    #[error("`{0}` must be a JSON object")]
    NotAnObject(&'static str),

    /// A required field is missing. The payload names the full path,
    /// e.g. `api.version`.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but has the wrong JSON type.
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// `action.code` is not one of the recognised action codes.
    #[error("`{0}` is not a valid action code")]
    UnknownCode(String),

    /// `api.name` does not match the engine's identity.
    #[error("`{0}` is a different API name to the one offered")]
    ApiNameMismatch(String),

    /// `api.version` does not match the engine's supported version.
    #[error("{0} is a different API version to the one offered")]
    ApiVersionMismatch(i64),

    /// START needs someone else to alert, and nobody else is registered.
    #[error("no other registered players to alert")]
    NoOtherPlayers,
}
