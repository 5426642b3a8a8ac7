use crate::auth::password;
use crate::error::HandlerError;
use crate::user::UserId;
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use anyhow::Context;
use moneytracker_repo::user_repo::{Profile, UserRepo};
use serde::Deserialize;
use std::sync::Arc;

#[get("/profile")]
pub async fn get_profile(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let profile = user_repo.get_profile(&user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profile")]
pub async fn update_profile(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    user_id: web::ReqData<UserId>,
    profile: web::Json<Profile>,
) -> Result<impl Responder, HandlerError> {
    let profile = profile.into_inner();
    if let Some(age) = profile.age {
        if !(0..=150).contains(&age) {
            return Err(HandlerError::Validation(
                "age must be between 0 and 150".to_owned(),
            ));
        }
    }

    user_repo
        .update_profile(&user_id.into_inner(), profile.clone())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[derive(Deserialize)]
pub struct PasswordUpdate {
    pub old_password: String,
    pub new_password: String,
}

#[put("/password")]
pub async fn update_password(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    user_id: web::ReqData<UserId>,
    update: web::Json<PasswordUpdate>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let update = update.into_inner();
    if update.new_password.is_empty() {
        return Err(HandlerError::Validation(
            "new password must not be empty".to_owned(),
        ));
    }

    let user = user_repo.get_user(&user_id).await?;
    let matched = password::verify_password(update.old_password, user.password_hash)
        .context("Unable to verify password")?;
    if !matched {
        return Ok(HttpResponse::Unauthorized().finish());
    }

    let password_hash =
        password::encode_password(update.new_password).context("Unable to hash password")?;
    user_repo
        .update_password_hash(&user_id, &password_hash)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[delete("")]
pub async fn delete_user(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    user_repo.delete_user(&user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
