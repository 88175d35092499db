#![allow(dead_code)]

use entity::employee::{self, City};
use migration::{Migrator, MigratorTrait};
use products_hr::catalog::ensure_catalog;
use products_hr::employees::{NewEmployee, provision_employee};
use products_hr::users::{NewUser, create_user};
use sea_orm::{Database, DatabaseConnection};

/// Fresh in-memory store with the full schema and catalog rows.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    ensure_catalog(&db).await.unwrap();
    db
}

pub async fn staff_employee(
    db: &DatabaseConnection,
    username: &str,
    full_name: &str,
) -> employee::Model {
    hire(
        db,
        username,
        NewEmployee::new(uuid::Uuid::nil(), full_name, City::Moscow),
    )
    .await
}

/// Creates a staff user and provisions `input` for it; `input.user_id` is replaced.
pub async fn hire(
    db: &DatabaseConnection,
    username: &str,
    mut input: NewEmployee,
) -> employee::Model {
    let user = create_user(db, NewUser::staff(username)).await.unwrap();
    input.user_id = user.id;
    provision_employee(db, input).await.unwrap()
}
