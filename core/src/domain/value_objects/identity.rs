//! Verified identity value object.

use uuid::Uuid;

/// Outcome of a successful credential verification
///
/// Carries exactly what the token service needs to mint a pair: the subject
/// and the role current at the time of verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// The authenticated user's ID
    pub user_id: Uuid,

    /// The role held at verification time
    pub role: String,
}

impl VerifiedIdentity {
    /// Creates a new verified identity
    pub fn new(user_id: Uuid, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }
}
