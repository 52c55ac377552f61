//! The user action contract and its structural validation.
//!
//! An action arrives as untrusted JSON of the shape:
//!
//! ```json
//! {
//!     "api": { "name": "buzztag", "version": 1 },
//!     "action": { "code": "BUTTON_PRESS", "data": { } }
//! }
//! ```
//!
//! Validation is an explicit, hand-written structural check rather than a
//! plain serde derive. Deriving `Deserialize` would reject the same
//! inputs, but its error messages depend on serde internals; callers rely
//! on the enumerated [`ActionError`] reasons staying stable, so each
//! check is spelled out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ActionError;

/// The API name a user action must carry to be accepted.
pub const API_NAME: &str = "buzztag";

/// The API version a user action must carry to be accepted.
pub const API_VERSION: i64 = 1;

/// The enumerated set of things a player can do.
///
/// `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]` makes the JSON
/// representation `"BUTTON_PRESS"` rather than `"ButtonPress"`, matching
/// what callers send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCode {
    /// Press the shared button: clears your own alert and propagates
    /// alerts to one or two other players.
    ButtonPress,
    /// Ask whether you are currently alerted. Read-only.
    CheckIfAlerted,
    /// Kick off a round by alerting one other player at random.
    Start,
    /// Clear every player's alert.
    Stop,
}

impl ActionCode {
    /// Parses the wire spelling of an action code.
    fn parse(code: &str) -> Result<Self, ActionError> {
        match code {
            "BUTTON_PRESS" => Ok(Self::ButtonPress),
            "CHECK_IF_ALERTED" => Ok(Self::CheckIfAlerted),
            "START" => Ok(Self::Start),
            "STOP" => Ok(Self::Stop),
            other => Err(ActionError::UnknownCode(other.to_string())),
        }
    }
}

/// Which API the caller believes it is talking to.
///
/// The engine rejects actions naming a different API or version, so a
/// client built against an incompatible contract fails loudly instead of
/// being misinterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHeader {
    pub name: String,
    pub version: i64,
}

/// The action itself: a code plus optional opaque data.
///
/// `data` is accepted and echoed back but never interpreted; none of the
/// current action codes use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBody {
    pub code: ActionCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

/// A fully validated user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAction {
    pub api: ApiHeader,
    pub action: ActionBody,
}

impl UserAction {
    /// Validates untrusted JSON against the action contract.
    ///
    /// Checks structure only: required fields present, field types
    /// correct, `action.code` drawn from the enumerated set. Whether the
    /// API name and version match the engine is checked by the engine,
    /// not here - the structure of a mismatched action is still valid.
    ///
    /// # Errors
    /// One of the structural [`ActionError`] variants, each naming the
    /// offending field.
    pub fn from_value(value: &Value) -> Result<Self, ActionError> {
        let root = value
            .as_object()
            .ok_or(ActionError::NotAnObject("user_action"))?;

        let api = root
            .get("api")
            .ok_or(ActionError::MissingField("api"))?
            .as_object()
            .ok_or(ActionError::NotAnObject("api"))?;
        let name = api
            .get("name")
            .ok_or(ActionError::MissingField("api.name"))?
            .as_str()
            .ok_or(ActionError::WrongType {
                field: "api.name",
                expected: "a string",
            })?;
        let version = api
            .get("version")
            .ok_or(ActionError::MissingField("api.version"))?
            .as_i64()
            .ok_or(ActionError::WrongType {
                field: "api.version",
                expected: "an integer",
            })?;

        let action = root
            .get("action")
            .ok_or(ActionError::MissingField("action"))?
            .as_object()
            .ok_or(ActionError::NotAnObject("action"))?;
        let code = action
            .get("code")
            .ok_or(ActionError::MissingField("action.code"))?
            .as_str()
            .ok_or(ActionError::WrongType {
                field: "action.code",
                expected: "a string",
            })
            .and_then(ActionCode::parse)?;
        let data = match action.get("data") {
            None => None,
            Some(value) => Some(
                value
                    .as_object()
                    .ok_or(ActionError::WrongType {
                        field: "action.data",
                        expected: "an object",
                    })?
                    .clone(),
            ),
        };

        Ok(Self {
            api: ApiHeader {
                name: name.to_string(),
                version,
            },
            action: ActionBody { code, data },
        })
    }
}

// =========================================================================
// Tests
// =========================================================================
