mod common;

use common::setup_db;
use entity::{employee, employee_draft, news_article, user};
use products_hr::seed::seed_demo;
use products_hr::users::{NewUser, create_user, delete_user, find_user_by_username};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn seeding_builds_the_demo_organisation_once() {
    let db = setup_db().await;
    let seeded = seed_demo(&db).await.unwrap().expect("first run seeds");
    assert_eq!(seeded.employees.len(), 4);
    assert_eq!(seeded.drafts.len(), 1);
    assert_eq!(seeded.articles.len(), 2);

    let lead = seeded
        .employee_named("Волков Ярослав Владимирович")
        .unwrap();
    assert!(
        seeded
            .employees
            .iter()
            .filter(|e| e.id != lead.id)
            .all(|e| e.manager_id == Some(lead.id))
    );

    assert!(seed_demo(&db).await.unwrap().is_none());
    assert_eq!(employee::Entity::find().count(&db).await.unwrap(), 4);
}

#[tokio::test]
async fn failed_seed_leaves_nothing_behind() {
    let db = setup_db().await;
    let taken = create_user(&db, NewUser::staff("i.petrov")).await.unwrap();

    assert!(seed_demo(&db).await.is_err());
    assert!(
        find_user_by_username(&db, "y.volkov")
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(employee::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(employee_draft::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(news_article::Entity::find().count(&db).await.unwrap(), 0);

    delete_user(&db, taken.id).await.unwrap();
    let seeded = seed_demo(&db).await.unwrap().expect("retry seeds");
    assert_eq!(seeded.employees.len(), 4);
}
