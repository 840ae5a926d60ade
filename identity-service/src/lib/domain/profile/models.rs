use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::domain::principal::models::PrincipalId;
use crate::domain::profile::errors::ProfileError;

const NAME_MAX_LENGTH: usize = 100;
const PHONE_MAX_LENGTH: usize = 20;
const AVATAR_URL_MAX_LENGTH: usize = 255;
const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Personal details attached to a principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub principal_id: PrincipalId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Empty profile for a principal, stamped at `now`.
    pub fn empty(principal_id: PrincipalId, now: DateTime<Utc>) -> Self {
        Self {
            principal_id,
            first_name: None,
            last_name: None,
            phone: None,
            address: None,
            date_of_birth: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field present in `fields`, leaving the rest untouched.
    pub fn apply(&mut self, fields: ProfileFields, now: DateTime<Utc>) {
        if let Some(first_name) = fields.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = fields.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(phone) = fields.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = fields.address {
            self.address = Some(address);
        }
        if let Some(date_of_birth) = fields.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(avatar_url) = fields.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        self.updated_at = now;
    }
}

/// Validated, partially populated profile fields.
///
/// `None` means "not supplied"; on update the stored value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_url: Option<String>,
}

impl ProfileFields {
    /// Validate raw field values.
    ///
    /// An empty `date_of_birth` is treated as not supplied.
    ///
    /// # Errors
    /// * `FieldTooLong` - A name, phone, or avatar URL exceeds its limit
    /// * `InvalidDateOfBirth` - Date is not `YYYY-MM-DD`
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        date_of_birth: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Self, ProfileError> {
        let first_name = check_length("first_name", first_name, NAME_MAX_LENGTH)?;
        let last_name = check_length("last_name", last_name, NAME_MAX_LENGTH)?;
        let phone = check_length("phone", phone, PHONE_MAX_LENGTH)?;
        let avatar_url = check_length("avatar_url", avatar_url, AVATAR_URL_MAX_LENGTH)?;

        let date_of_birth = match date_of_birth.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, DATE_OF_BIRTH_FORMAT)
                    .map_err(|_| ProfileError::InvalidDateOfBirth(raw.to_string()))?,
            ),
        };

        Ok(Self {
            first_name,
            last_name,
            phone,
            address,
            date_of_birth,
            avatar_url,
        })
    }
}

fn check_length(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ProfileError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ProfileError::FieldTooLong { field, max }),
        other => Ok(other),
    }
}

/// Command to update the caller's profile
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub fields: ProfileFields,
}

impl UpdateProfileCommand {
    pub fn new(fields: ProfileFields) -> Self {
        Self { fields }
    }
}
