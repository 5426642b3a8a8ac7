use crate::user_repo::{Profile, User, UserRepo, UserRepoError};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct UserEntry {
    password_hash: String,
    profile: Profile,
}

pub struct MemUserRepo {
    users: RwLock<HashMap<String, UserEntry>>,
}

impl MemUserRepo {
    pub fn new() -> MemUserRepo {
        MemUserRepo {
            users: RwLock::new(HashMap::new()),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<HashMap<String, UserEntry>>, anyhow::Error> {
        self.users
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<HashMap<String, UserEntry>>, anyhow::Error> {
        self.users
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

impl Default for MemUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepo for MemUserRepo {
    async fn get_user(&self, user_id: &str) -> Result<User, UserRepoError> {
        let read_guard = self.read_lock()?;
        read_guard
            .get(user_id)
            .map(|entry| User::new(user_id.to_owned(), entry.password_hash.clone()))
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))
    }

    async fn create_user(&self, user: User) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;
        match write_guard.entry(user.id.clone()) {
            Entry::Occupied(_) => Err(UserRepoError::UserAlreadyExists(user.id)),
            Entry::Vacant(vacant) => {
                vacant.insert(UserEntry {
                    password_hash: user.password_hash,
                    profile: Profile::default(),
                });
                Ok(())
            }
        }
    }

    async fn update_password_hash(
        &self,
        user_id: &str,
        password_hash: &str,
    ) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;
        let entry = write_guard
            .get_mut(user_id)
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))?;
        entry.password_hash = password_hash.to_owned();
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Profile, UserRepoError> {
        let read_guard = self.read_lock()?;
        read_guard
            .get(user_id)
            .map(|entry| entry.profile.clone())
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))
    }

    async fn update_profile(&self, user_id: &str, profile: Profile) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;
        let entry = write_guard
            .get_mut(user_id)
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))?;
        entry.profile = profile;
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;
        write_guard
            .remove(user_id)
            .map(|_| ())
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))
    }
}
