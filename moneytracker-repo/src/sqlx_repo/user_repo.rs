use crate::sqlx_repo::SQLxRepo;
use crate::user_repo::{Occupation, Profile, User, UserRepo, UserRepoError};
use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct ProfileEntry {
    name: Option<String>,
    last_name: Option<String>,
    age: Option<i32>,
    nationality: Option<String>,
    country_id: Option<i32>,
    city_id: Option<i32>,
    neighborhood_id: Option<i32>,
    address: Option<String>,
    occupation: Option<String>,
    profile_picture: Option<String>,
}

impl TryFrom<ProfileEntry> for Profile {
    type Error = anyhow::Error;

    fn try_from(value: ProfileEntry) -> Result<Self, Self::Error> {
        let occupation = value
            .occupation
            .as_deref()
            .map(str::parse::<Occupation>)
            .transpose()?;
        Ok(Profile {
            name: value.name,
            last_name: value.last_name,
            age: value.age,
            nationality: value.nationality,
            country_id: value.country_id,
            city_id: value.city_id,
            neighborhood_id: value.neighborhood_id,
            address: value.address,
            occupation,
            profile_picture: value.profile_picture,
        })
    }
}

#[async_trait]
impl UserRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> Result<User, UserRepoError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM users WHERE id = $1")
                .bind(user_id.to_owned())
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get user {}", user_id))?;
        row.map(|(password_hash,)| User::new(user_id.to_owned(), password_hash))
            .ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))
    }

    #[instrument(skip(self, user))]
    async fn create_user(&self, user: User) -> Result<(), UserRepoError> {
        let result =
            sqlx::query("INSERT INTO users(id, password_hash) VALUES($1, $2) ON CONFLICT DO NOTHING")
                .bind(user.id.clone())
                .bind(user.password_hash)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Unable to create user {}", user.id))?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(UserRepoError::UserAlreadyExists(user.id))
        }
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password_hash(
        &self,
        user_id: &str,
        password_hash: &str,
    ) -> Result<(), UserRepoError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash.to_owned())
            .bind(user_id.to_owned())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to update password for {}", user_id))?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(UserRepoError::UserNotFound(user_id.to_owned()))
        }
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> Result<Profile, UserRepoError> {
        let entry: Option<ProfileEntry> = sqlx::query_as(
            "SELECT name, last_name, age, nationality, country_id, city_id, neighborhood_id, \
             address, occupation, profile_picture FROM users WHERE id = $1",
        )
        .bind(user_id.to_owned())
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get profile for {}", user_id))?;

        let entry = entry.ok_or_else(|| UserRepoError::UserNotFound(user_id.to_owned()))?;
        Ok(entry.try_into()?)
    }

    #[instrument(skip(self, profile))]
    async fn update_profile(&self, user_id: &str, profile: Profile) -> Result<(), UserRepoError> {
        let result = sqlx::query(
            "UPDATE users SET name = $1, last_name = $2, age = $3, nationality = $4, \
             country_id = $5, city_id = $6, neighborhood_id = $7, address = $8, \
             occupation = $9, profile_picture = $10 WHERE id = $11",
        )
        .bind(profile.name)
        .bind(profile.last_name)
        .bind(profile.age)
        .bind(profile.nationality)
        .bind(profile.country_id)
        .bind(profile.city_id)
        .bind(profile.neighborhood_id)
        .bind(profile.address)
        .bind(profile.occupation.map(|o| o.to_string()))
        .bind(profile.profile_picture)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to update profile for {}", user_id))?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(UserRepoError::UserNotFound(user_id.to_owned()))
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.to_owned())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete user {}", user_id))?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(UserRepoError::UserNotFound(user_id.to_owned()))
        }
    }
}
