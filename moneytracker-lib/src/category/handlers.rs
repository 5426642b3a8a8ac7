use crate::category::validate_new_category;
use crate::error::HandlerError;
use crate::user::UserId;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use moneytracker_repo::category_repo::{CategoryRepo, NewCategory};
use moneytracker_repo::transaction_repo::TransactionRepo;
use std::sync::Arc;

#[get("")]
pub async fn get_categories(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let categories = category_repo.get_categories(&user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("")]
pub async fn create_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
    new_category: web::Json<NewCategory>,
) -> Result<impl Responder, HandlerError> {
    let new_category = new_category.into_inner();
    validate_new_category(&new_category)?;

    let category = category_repo
        .create_category(&user_id.into_inner(), new_category)
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/{category_id}")]
pub async fn update_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
    category_id: web::Path<i32>,
    updated_category: web::Json<NewCategory>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let category_id = category_id.into_inner();
    let updated_category = updated_category.into_inner();
    validate_new_category(&updated_category)?;

    let existing = category_repo.get_category(&user_id, category_id).await?;
    if existing.is_default {
        return Err(HandlerError::Forbidden(
            "default categories cannot be modified".to_owned(),
        ));
    }

    let category = category_repo
        .update_category(&user_id, category_id, updated_category)
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/{category_id}")]
pub async fn delete_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    category_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let category_id = category_id.into_inner();

    let existing = category_repo.get_category(&user_id, category_id).await?;
    if existing.is_default {
        return Err(HandlerError::Forbidden(
            "default categories cannot be deleted".to_owned(),
        ));
    }

    let references = transaction_repo
        .count_with_category(&user_id, &existing.name)
        .await?;
    if references > 0 {
        return Err(HandlerError::Conflict(format!(
            "category {} is used by {} transactions",
            existing.name, references
        )));
    }

    category_repo.delete_category(&user_id, category_id).await?;
    Ok(HttpResponse::Ok().finish())
}
