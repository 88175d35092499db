mod common;

use common::setup_db;
use entity::Choice;
use entity::position::PositionCode;
use entity::specialization::SpecializationCode;
use products_hr::HrError;
use products_hr::catalog::{
    ensure_catalog, find_specialization, list_positions, list_specializations,
    resolve_specializations,
};

#[tokio::test]
async fn catalog_holds_every_code_once() {
    let db = setup_db().await;
    ensure_catalog(&db).await.unwrap();

    let positions = list_positions(&db).await.unwrap();
    assert_eq!(positions.len(), PositionCode::all().len());
    let specializations = list_specializations(&db).await.unwrap();
    assert_eq!(specializations.len(), SpecializationCode::all().len());
}

#[tokio::test]
async fn catalog_rows_render_their_labels() {
    let db = setup_db().await;
    let python = find_specialization(&db, SpecializationCode::Python)
        .await
        .unwrap();
    assert_eq!(python.to_string(), "Python");
    let go = find_specialization(&db, SpecializationCode::Go).await.unwrap();
    assert_eq!(go.to_string(), "Go");

    let labels: Vec<String> = list_positions(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.to_string())
        .collect();
    assert!(labels.contains(&"Менеджер".to_string()));
}

#[tokio::test]
async fn resolve_reports_missing_rows() {
    let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
    <migration::Migrator as migration::MigratorTrait>::up(&db, None)
        .await
        .unwrap();

    let err = resolve_specializations(&db, &[SpecializationCode::Go])
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::NotFound { entity: "specialization", .. }));
    assert!(resolve_specializations(&db, &[]).await.unwrap().is_empty());
}

#[test]
fn unknown_codes_fail_to_parse() {
    assert!("kotlin".parse::<SpecializationCode>().is_err());
    assert!("intern".parse::<PositionCode>().is_err());
    assert_eq!(SpecializationCode::DataEngineer.label(), "Data Engineer");
}
