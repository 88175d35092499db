//! Position and specialization lookup tables.

use std::collections::HashSet;

use entity::position::{self, PositionCode};
use entity::specialization::{self, SpecializationCode};
use entity::{Choice, employee};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{HrError, HrResult};

/// Inserts a row for every declared position and specialization code.
/// Existing rows are left alone, so this is safe to run on every start.
pub async fn ensure_catalog<C: ConnectionTrait>(db: &C) -> HrResult<()> {
    let existing: HashSet<PositionCode> = position::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.name)
        .collect();
    for code in PositionCode::all() {
        if existing.contains(&code) {
            continue;
        }
        position::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(code),
        }
        .insert(db)
        .await?;
        info!(position = code.label(), "position added to catalog");
    }

    let existing: HashSet<SpecializationCode> = specialization::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.name)
        .collect();
    for code in SpecializationCode::all() {
        if existing.contains(&code) {
            continue;
        }
        specialization::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(code),
        }
        .insert(db)
        .await?;
        info!(specialization = code.label(), "specialization added to catalog");
    }
    Ok(())
}

pub async fn find_position<C: ConnectionTrait>(
    db: &C,
    code: PositionCode,
) -> HrResult<position::Model> {
    position::Entity::find()
        .filter(position::Column::Name.eq(code))
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found("position", code.to_value()))
}

pub async fn list_positions<C: ConnectionTrait>(db: &C) -> HrResult<Vec<position::Model>> {
    Ok(position::Entity::find()
        .order_by_asc(position::Column::Name)
        .all(db)
        .await?)
}

/// Deleting a position leaves its employees without one.
pub async fn delete_position<C: ConnectionTrait>(db: &C, id: Uuid) -> HrResult<()> {
    let row = position::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found("position", id))?;
    let holders = row.find_related(employee::Entity).count(db).await?;
    row.delete(db).await?;
    info!(%id, holders, "position deleted");
    Ok(())
}

pub async fn find_specialization<C: ConnectionTrait>(
    db: &C,
    code: SpecializationCode,
) -> HrResult<specialization::Model> {
    specialization::Entity::find()
        .filter(specialization::Column::Name.eq(code))
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found("specialization", code.to_value()))
}

pub async fn list_specializations<C: ConnectionTrait>(
    db: &C,
) -> HrResult<Vec<specialization::Model>> {
    Ok(specialization::Entity::find()
        .order_by_asc(specialization::Column::Name)
        .all(db)
        .await?)
}

/// Resolves codes to rows, dropping duplicates. Every code must exist.
pub async fn resolve_specializations<C: ConnectionTrait>(
    db: &C,
    codes: &[SpecializationCode],
) -> HrResult<Vec<specialization::Model>> {
    let wanted: HashSet<SpecializationCode> = codes.iter().copied().collect();
    if wanted.is_empty() {
        return Ok(Vec::new());
    }
    let rows = specialization::Entity::find()
        .filter(specialization::Column::Name.is_in(wanted.iter().copied()))
        .order_by_asc(specialization::Column::Name)
        .all(db)
        .await?;
    if let Some(missing) = wanted
        .iter()
        .find(|code| !rows.iter().any(|row| row.name == **code))
    {
        return Err(HrError::not_found("specialization", missing.to_value()));
    }
    debug!(count = rows.len(), "specializations resolved");
    Ok(rows)
}
