use std::fmt;
use std::str::FromStr;

use auth::AuthenticationResult;
use auth::Claims;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::profile::models::ProfileFields;
use crate::principal::errors::CredentialError;
use crate::principal::errors::IdentityKeyError;
use crate::principal::errors::PasswordPolicyError;
use crate::principal::errors::PrincipalIdError;
use crate::principal::errors::RoleError;

/// Principal aggregate entity.
///
/// Represents a registered account. The password hash never leaves the
/// service boundary; HTTP responses are built from the other fields only.
#[derive(Clone)]
pub struct Principal {
    pub id: PrincipalId,
    pub email: IdentityKey,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Store-assigned principal identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrincipalId(pub i64);

impl PrincipalId {
    /// Parse a principal ID from its decimal representation.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, PrincipalIdError> {
        s.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(PrincipalId)
            .ok_or_else(|| PrincipalIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity key (email address) value type
///
/// Always stored trimmed and lower-cased, so equality is case- and
/// whitespace-insensitive with respect to the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Normalize and validate an email address.
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `InvalidFormat` - Not an RFC 5322 address
    pub fn new(raw: &str) -> Result<Self, IdentityKeyError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(IdentityKeyError::Empty);
        }

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| IdentityKey(normalized))
            .map_err(|e| IdentityKeyError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role tag carried by a principal and its tokens.
///
/// The set is closed per build: a new role needs a new variant here (and in
/// `as_str`/`FromStr`) before tokens carrying its tag are accepted. Tokens
/// with an unknown tag fail `AuthenticatedPrincipal::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Customer,
    Courier,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Courier => "COURIER",
            Role::Manager => "MANAGER",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(Role::Customer),
            "COURIER" => Ok(Role::Courier),
            "MANAGER" => Ok(Role::Manager),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plaintext password accepted for registration.
///
/// Length is counted in characters. The value is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new principal with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: IdentityKey,
    pub password: Password,
    pub role: Role,
    pub profile: ProfileFields,
}

impl RegisterCommand {
    pub fn new(email: IdentityKey, password: Password, role: Role, profile: ProfileFields) -> Self {
        Self {
            email,
            password,
            role,
            profile,
        }
    }
}

/// Command to log in.
///
/// Fields are kept raw: any malformed email simply fails as invalid credentials.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Principal data handed to the store on registration.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub email: IdentityKey,
    pub password_hash: String,
    pub role: Role,
    pub profile: ProfileFields,
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub principal: Principal,
    pub access_token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl AuthenticatedSession {
    pub fn new(principal: Principal, result: AuthenticationResult) -> Self {
        Self {
            principal,
            expires_in: result.claims.exp - result.claims.iat,
            access_token: result.access_token,
        }
    }
}

/// Identity of the caller of a protected request, decoded from its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub principal_id: PrincipalId,
    pub email: String,
    pub role: Role,
}

impl TryFrom<Claims> for AuthenticatedPrincipal {
    type Error = CredentialError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let principal_id = PrincipalId::from_string(&claims.sub).map_err(|e| {
            tracing::debug!(error = %e, "Token subject is not a principal ID");
            CredentialError::InvalidToken
        })?;

        let role = claims.role.parse::<Role>().map_err(|e| {
            tracing::debug!(error = %e, "Token carries an unknown role");
            CredentialError::InvalidToken
        })?;

        Ok(Self {
            principal_id,
            email: claims.email,
            role,
        })
    }
}
