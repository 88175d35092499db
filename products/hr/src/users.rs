//! Minimal user-identity records. Credentials and sessions live in the
//! identity service; HR keeps the row employees are attached to.

use chrono::Utc;
use entity::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{HrError, HrResult};

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
}

impl NewUser {
    pub fn staff(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            is_staff: true,
        }
    }
}

pub async fn create_user<C: ConnectionTrait>(db: &C, input: NewUser) -> HrResult<user::Model> {
    entity::validation::validate_required("username", &input.username)?;
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(input.username.trim().to_string()),
        email: Set(input.email.filter(|email| !email.trim().is_empty())),
        is_staff: Set(input.is_staff),
        is_active: Set(true),
        date_joined: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    info!(user_id = %created.id, username = %created.username, "user created");
    Ok(created)
}

pub async fn find_user<C: ConnectionTrait>(db: &C, id: Uuid) -> HrResult<user::Model> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found("user", id))
}

pub async fn find_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> HrResult<Option<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?)
}

/// Removes the identity row; the store cascades to the employee record.
pub async fn delete_user<C: ConnectionTrait>(db: &C, id: Uuid) -> HrResult<()> {
    let result = user::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(HrError::not_found("user", id));
    }
    info!(user_id = %id, "user deleted");
    Ok(())
}
