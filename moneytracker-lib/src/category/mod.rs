mod handlers;

use crate::error::HandlerError;
use actix_web::{web, Scope};
use moneytracker_repo::category_repo::NewCategory;

pub fn category_service() -> Scope {
    web::scope("/categories")
        .service(handlers::get_categories)
        .service(handlers::create_category)
        .service(handlers::update_category)
        .service(handlers::delete_category)
}

const MAX_NAME_LENGTH: usize = 50;

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn validate_new_category(new_category: &NewCategory) -> Result<(), HandlerError> {
    if new_category.name.is_empty() || new_category.name.chars().count() > MAX_NAME_LENGTH {
        return Err(HandlerError::Validation(format!(
            "name must be between 1 and {} characters",
            MAX_NAME_LENGTH
        )));
    }
    if !is_hex_color(&new_category.color) {
        return Err(HandlerError::Validation(
            "color must be a hex color like #A1B2C3".to_owned(),
        ));
    }
    if new_category.icon.is_empty() {
        return Err(HandlerError::Validation("icon must not be empty".to_owned()));
    }
    for subcategory in &new_category.subcategories {
        if subcategory.is_empty() || subcategory.chars().count() > MAX_NAME_LENGTH {
            return Err(HandlerError::Validation(format!(
                "subcategories must be between 1 and {} characters",
                MAX_NAME_LENGTH
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneytracker_repo::transaction_repo::TransactionType;

    fn new_category(color: &str) -> NewCategory {
        NewCategory {
            name: "Mascotas".to_owned(),
            color: color.to_owned(),
            icon: "paw".to_owned(),
            category_type: TransactionType::Expense,
            subcategories: vec!["Veterinaria".to_owned()],
        }
    }

    #[test]
    fn well_formed_category_accepted() {
        assert!(validate_new_category(&new_category("#A1B2C3")).is_ok());
        assert!(validate_new_category(&new_category("#a1b2c3")).is_ok());
    }

    #[test]
    fn malformed_colors_rejected() {
        for color in ["A1B2C3", "#A1B2", "#A1B2C3D4", "#GGGGGG", ""] {
            assert!(
                validate_new_category(&new_category(color)).is_err(),
                "color {:?} should be rejected",
                color
            );
        }
    }

    #[test]
    fn empty_name_rejected() {
        let mut category = new_category("#A1B2C3");
        category.name = String::new();
        assert!(validate_new_category(&category).is_err());
    }

    #[test]
    fn empty_subcategory_rejected() {
        let mut category = new_category("#A1B2C3");
        category.subcategories.push(String::new());
        assert!(validate_new_category(&category).is_err());
    }
}
