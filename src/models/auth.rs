use serde::{Deserialize, Serialize};

/// The backend's answer to a successful identity exchange. The access token
/// is the opaque bearer credential the rest of the client runs on.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
