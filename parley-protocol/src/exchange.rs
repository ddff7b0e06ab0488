//! Exchange types carried over the wire.
//!
//! An exchange is a discriminant-tagged message: the u32 id on the wire
//! selects which JSON payload schema follows. The set of variants is
//! closed; registering a new exchange means adding a discriminant here
//! and a codec case, and the compiler points at every dispatch site.

use crate::error::ExchangeError;
use serde::{Deserialize, Serialize};

/// Wire discriminant for an exchange.
///
/// The numbering is part of the wire contract and must not be
/// reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ExchangeId {
    Signup = 0,
    Login = 1,
    Message = 2,
}

impl ExchangeId {
    /// Parses a raw wire discriminant.
    pub fn from_wire(raw: u32) -> Result<Self, ExchangeError> {
        match raw {
            0 => Ok(ExchangeId::Signup),
            1 => Ok(ExchangeId::Login),
            2 => Ok(ExchangeId::Message),
            other => Err(ExchangeError::UnknownExchange(other)),
        }
    }

    /// Returns the raw wire discriminant.
    pub fn as_wire(self) -> u32 {
        self as u32
    }
}

/// Request to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request to verify credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A chat message addressed to a named receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(rename = "to")]
    pub receiver: String,
    #[serde(rename = "msg")]
    pub message: String,
}

/// A typed exchange: discriminant plus variant-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    Signup(SignupRequest),
    Login(LoginRequest),
    Message(MessageRequest),
}

impl Exchange {
    /// Returns the wire discriminant for this exchange.
    pub fn id(&self) -> ExchangeId {
        match self {
            Exchange::Signup(_) => ExchangeId::Signup,
            Exchange::Login(_) => ExchangeId::Login,
            Exchange::Message(_) => ExchangeId::Message,
        }
    }

    /// Serializes the payload to JSON bytes.
    pub fn payload_json(&self) -> Result<Vec<u8>, ExchangeError> {
        let bytes = match self {
            Exchange::Signup(req) => serde_json::to_vec(req)?,
            Exchange::Login(req) => serde_json::to_vec(req)?,
            Exchange::Message(req) => serde_json::to_vec(req)?,
        };
        Ok(bytes)
    }

    /// Deserializes a payload using the schema registered for `id`.
    pub fn from_payload(id: ExchangeId, payload: &[u8]) -> Result<Self, ExchangeError> {
        let exchange = match id {
            ExchangeId::Signup => Exchange::Signup(serde_json::from_slice(payload)?),
            ExchangeId::Login => Exchange::Login(serde_json::from_slice(payload)?),
            ExchangeId::Message => Exchange::Message(serde_json::from_slice(payload)?),
        };
        Ok(exchange)
    }
}

impl From<SignupRequest> for Exchange {
    fn from(req: SignupRequest) -> Self {
        Exchange::Signup(req)
    }
}

impl From<LoginRequest> for Exchange {
    fn from(req: LoginRequest) -> Self {
        Exchange::Login(req)
    }
}

impl From<MessageRequest> for Exchange {
    fn from(req: MessageRequest) -> Self {
        Exchange::Message(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_ids_are_stable() {
        assert_eq!(ExchangeId::Signup.as_wire(), 0);
        assert_eq!(ExchangeId::Login.as_wire(), 1);
        assert_eq!(ExchangeId::Message.as_wire(), 2);
    }

    #[test]
    fn test_from_wire_roundtrip() {
        for id in [ExchangeId::Signup, ExchangeId::Login, ExchangeId::Message] {
            assert_eq!(ExchangeId::from_wire(id.as_wire()).unwrap(), id);
        }
    }

    #[test]
    fn test_from_wire_rejects_unknown() {
        let result = ExchangeId::from_wire(3);
        assert!(matches!(result, Err(ExchangeError::UnknownExchange(3))));
    }

    #[test]
    fn test_message_wire_field_names() {
        let req = MessageRequest {
            receiver: "alice".to_string(),
            message: "hi".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"to":"alice","msg":"hi"}"#);
    }

    #[test]
    fn test_signup_wire_field_names() {
        let req = SignupRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"username":"alice","password":"secret"}"#);
    }

    #[test]
    fn test_payload_json_is_deterministic() {
        let exchange = Exchange::Login(LoginRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
        });
        assert_eq!(
            exchange.payload_json().unwrap(),
            exchange.payload_json().unwrap()
        );
    }

    #[test]
    fn test_payload_roundtrip_per_variant() {
        let exchanges = [
            Exchange::Signup(SignupRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
            }),
            Exchange::Login(LoginRequest {
                username: "".to_string(),
                password: "".to_string(),
            }),
            Exchange::Message(MessageRequest {
                receiver: "bob".to_string(),
                message: "quote \" brace } newline \n".to_string(),
            }),
        ];

        for exchange in exchanges {
            let payload = exchange.payload_json().unwrap();
            let decoded = Exchange::from_payload(exchange.id(), &payload).unwrap();
            assert_eq!(decoded, exchange);
        }
    }

    #[test]
    fn test_from_payload_rejects_malformed_json() {
        let result = Exchange::from_payload(ExchangeId::Signup, b"{not json");
        assert!(matches!(result, Err(ExchangeError::Decode(_))));
    }
}
