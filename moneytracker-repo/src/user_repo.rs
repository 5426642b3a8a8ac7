use anyhow::anyhow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[async_trait]
pub trait UserRepo: Sync + Send {
    async fn get_user(&self, user_id: &str) -> Result<User, UserRepoError>;
    async fn create_user(&self, user: User) -> Result<(), UserRepoError>;
    async fn update_password_hash(
        &self,
        user_id: &str,
        password_hash: &str,
    ) -> Result<(), UserRepoError>;
    async fn get_profile(&self, user_id: &str) -> Result<Profile, UserRepoError>;
    async fn update_profile(&self, user_id: &str, profile: Profile) -> Result<(), UserRepoError>;
    async fn delete_user(&self, user_id: &str) -> Result<(), UserRepoError>;
}

pub struct User {
    pub id: String,
    pub password_hash: String,
}

impl User {
    pub const fn new(id: String, password_hash: String) -> User {
        User { id, password_hash }
    }
}

/// Optional demographic data attached to a user. All fields start empty and
/// are only ever written through profile updates.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Debug)]
pub struct Profile {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub country_id: Option<i32>,
    pub city_id: Option<i32>,
    pub neighborhood_id: Option<i32>,
    pub address: Option<String>,
    pub occupation: Option<Occupation>,
    pub profile_picture: Option<String>,
}

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Occupation {
    Estudiante,
    Trabajador,
    Independiente,
    Desempleado,
    Otro,
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Occupation::Estudiante => "estudiante",
            Occupation::Trabajador => "trabajador",
            Occupation::Independiente => "independiente",
            Occupation::Desempleado => "desempleado",
            Occupation::Otro => "otro",
        };
        f.write_str(label)
    }
}

impl FromStr for Occupation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "estudiante" => Ok(Occupation::Estudiante),
            "trabajador" => Ok(Occupation::Trabajador),
            "independiente" => Ok(Occupation::Independiente),
            "desempleado" => Ok(Occupation::Desempleado),
            "otro" => Ok(Occupation::Otro),
            other => Err(anyhow!("unknown occupation {:?}", other)),
        }
    }
}

#[derive(Error, Debug)]
pub enum UserRepoError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("User {0} already exists")]
    UserAlreadyExists(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
