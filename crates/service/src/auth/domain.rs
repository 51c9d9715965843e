use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::staff::StaffRole;

/// Login input
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub username: String,
    #[serde(alias = "securitypin")]
    pub security_pin: String,
}

/// The authenticated staff member (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub username: String,
    pub role: StaffRole,
}

/// Stored credentials for one staff account (hashed pin)
#[derive(Debug, Clone)]
pub struct StaffCredentials {
    pub identity: AuthIdentity,
    pub pin_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub staff: AuthIdentity,
    pub token: String,
}

/// JWT payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// username
    pub sub: String,
    /// staff id
    pub uid: Uuid,
    pub role: StaffRole,
    pub exp: usize,
}

impl Claims {
    pub fn identity(&self) -> AuthIdentity {
        AuthIdentity { id: self.uid, username: self.sub.clone(), role: self.role }
    }
}
