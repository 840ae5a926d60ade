//! In-memory storage backend for tests and local development
//!
//! Implements both repository ports over a single lock, so the identity key
//! uniqueness check and the insert happen in one critical section.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::principal::models::IdentityKey;
use crate::domain::principal::models::NewPrincipal;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::ports::PrincipalRepository;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::ports::ProfileRepository;
use crate::principal::errors::CredentialError;

pub struct InMemoryRepository {
    data: RwLock<MemoryStore>,
}

struct MemoryStore {
    /// Last assigned principal ID
    sequence: i64,

    principals: HashMap<PrincipalId, Principal>,

    /// Unique index on the identity key
    email_index: HashMap<IdentityKey, PrincipalId>,

    profiles: HashMap<PrincipalId, Profile>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(MemoryStore {
                sequence: 0,
                principals: HashMap::new(),
                email_index: HashMap::new(),
                profiles: HashMap::new(),
            }),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryRepository {
    async fn create(&self, principal: NewPrincipal) -> Result<Principal, CredentialError> {
        let mut store = self.data.write().await;

        if store.email_index.contains_key(&principal.email) {
            return Err(CredentialError::DuplicateIdentity);
        }

        store.sequence += 1;
        let id = PrincipalId(store.sequence);
        let now = Utc::now();

        let created = Principal {
            id,
            email: principal.email,
            password_hash: principal.password_hash,
            role: principal.role,
            created_at: now,
        };

        let mut profile = Profile::empty(id, now);
        profile.apply(principal.profile, now);

        store.email_index.insert(created.email.clone(), id);
        store.principals.insert(id, created.clone());
        store.profiles.insert(id, profile);

        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &IdentityKey,
    ) -> Result<Option<Principal>, CredentialError> {
        let store = self.data.read().await;
        Ok(store
            .email_index
            .get(email)
            .and_then(|id| store.principals.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<Principal>, CredentialError> {
        let store = self.data.read().await;
        Ok(store.principals.get(&id).cloned())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn find_by_principal(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Option<Profile>, ProfileError> {
        let store = self.data.read().await;
        Ok(store.profiles.get(&principal_id).cloned())
    }

    async fn upsert(
        &self,
        principal_id: PrincipalId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileError> {
        let mut store = self.data.write().await;

        if !store.principals.contains_key(&principal_id) {
            return Err(ProfileError::NotFound);
        }

        let now = Utc::now();
        let profile = store
            .profiles
            .entry(principal_id)
            .or_insert_with(|| Profile::empty(principal_id, now));
        profile.apply(fields, now);

        Ok(profile.clone())
    }
}
