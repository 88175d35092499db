//! Employee drafts: proposed edits that wait for an approve/reject decision.

use chrono::Utc;
use entity::employee::City;
use entity::employee_draft::{self, DraftStatus};
use entity::position::PositionCode;
use entity::specialization::{self, SpecializationCode};
use entity::{employee, employee_draft_specialization, employee_specialization};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{find_position, resolve_specializations};
use crate::employees::{
    ensure_no_manager_cycle, find_employee, link_specializations, save_changes,
};
use crate::{HrError, HrResult};

/// Proposed values. Blank strings count as "no change".
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DraftInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<PositionCode>,
    #[serde(default)]
    pub specializations: Vec<SpecializationCode>,
    #[serde(default)]
    pub manager_id: Option<Uuid>,
    #[serde(default)]
    pub workplace_city: Option<City>,
    #[serde(default)]
    pub workplace_country: Option<String>,
    #[serde(default)]
    pub telegram_nick: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

struct DraftFields {
    full_name: Option<String>,
    position_id: Option<Uuid>,
    manager_id: Option<Uuid>,
    workplace_city: Option<City>,
    workplace_country: Option<String>,
    telegram_nick: Option<String>,
    about: Option<String>,
}

async fn prepare<C: ConnectionTrait>(
    db: &C,
    draft_id: Uuid,
    employee_id: Uuid,
    input: &DraftInput,
    now: DateTimeWithTimeZone,
) -> HrResult<DraftFields> {
    let position_id = match input.position {
        Some(code) => Some(find_position(db, code).await?.id),
        None => None,
    };
    if let Some(manager_id) = input.manager_id {
        find_employee(db, manager_id).await?;
    }
    let fields = DraftFields {
        full_name: non_blank(input.full_name.clone()),
        position_id,
        manager_id: input.manager_id,
        workplace_city: input.workplace_city,
        workplace_country: non_blank(input.workplace_country.clone()),
        telegram_nick: non_blank(input.telegram_nick.clone()),
        about: input.about.clone().filter(|v| !v.trim().is_empty()),
    };
    employee_draft::Model {
        id: draft_id,
        employee_id,
        full_name: fields.full_name.clone(),
        position_id: fields.position_id,
        manager_id: fields.manager_id,
        workplace_city: fields.workplace_city,
        workplace_country: fields.workplace_country.clone(),
        telegram_nick: fields.telegram_nick.clone(),
        about: fields.about.clone(),
        status: DraftStatus::Pending,
        created_at: now,
        updated_at: now,
    }
    .validate()?;
    Ok(fields)
}

/// Opens a pending draft against `employee_id`.
pub async fn create_draft<C>(
    db: &C,
    employee_id: Uuid,
    input: DraftInput,
) -> HrResult<employee_draft::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    find_employee(&txn, employee_id).await?;
    let id = Uuid::new_v4();
    let now: DateTimeWithTimeZone = Utc::now().into();
    let fields = prepare(&txn, id, employee_id, &input, now).await?;
    let created = employee_draft::ActiveModel {
        id: Set(id),
        employee_id: Set(employee_id),
        full_name: Set(fields.full_name),
        position_id: Set(fields.position_id),
        manager_id: Set(fields.manager_id),
        workplace_city: Set(fields.workplace_city),
        workplace_country: Set(fields.workplace_country),
        telegram_nick: Set(fields.telegram_nick),
        about: Set(fields.about),
        status: Set(DraftStatus::default()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;
    link_draft_specializations(&txn, id, &input.specializations).await?;
    txn.commit().await?;
    info!(draft_id = %id, %employee_id, "draft created");
    Ok(created)
}

/// Replaces the proposed values of a pending draft. `created_at` is kept,
/// `updated_at` moves to now.
pub async fn update_draft<C>(
    db: &C,
    draft_id: Uuid,
    input: DraftInput,
) -> HrResult<employee_draft::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let existing = find_draft(&txn, draft_id).await?;
    if existing.status.is_terminal() {
        return Err(HrError::DraftNotEditable(draft_id));
    }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let fields = prepare(&txn, draft_id, existing.employee_id, &input, now).await?;
    let mut active: employee_draft::ActiveModel = existing.into();
    active.full_name = Set(fields.full_name);
    active.position_id = Set(fields.position_id);
    active.manager_id = Set(fields.manager_id);
    active.workplace_city = Set(fields.workplace_city);
    active.workplace_country = Set(fields.workplace_country);
    active.telegram_nick = Set(fields.telegram_nick);
    active.about = Set(fields.about);
    active.updated_at = Set(now);
    if !write_if_pending(&txn, draft_id, active).await? {
        warn!(%draft_id, "draft was decided while being edited");
        return Err(HrError::DraftNotEditable(draft_id));
    }

    employee_draft_specialization::Entity::delete_many()
        .filter(employee_draft_specialization::Column::DraftId.eq(draft_id))
        .exec(&txn)
        .await?;
    link_draft_specializations(&txn, draft_id, &input.specializations).await?;
    let updated = find_draft(&txn, draft_id).await?;
    txn.commit().await?;
    info!(%draft_id, "draft updated");
    Ok(updated)
}

pub async fn find_draft<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> HrResult<employee_draft::Model> {
    employee_draft::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found("employee draft", id))
}

/// Proposal history of one employee, newest first.
pub async fn drafts_for_employee<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
) -> HrResult<Vec<employee_draft::Model>> {
    Ok(employee_draft::Entity::find()
        .filter(employee_draft::Column::EmployeeId.eq(employee_id))
        .order_by_desc(employee_draft::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn pending_drafts<C: ConnectionTrait>(
    db: &C,
) -> HrResult<Vec<employee_draft::Model>> {
    Ok(employee_draft::Entity::find()
        .filter(employee_draft::Column::Status.eq(DraftStatus::Pending))
        .order_by_asc(employee_draft::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn draft_specializations<C: ConnectionTrait>(
    db: &C,
    draft_id: Uuid,
) -> HrResult<Vec<specialization::Model>> {
    let draft = find_draft(db, draft_id).await?;
    Ok(draft
        .find_related(specialization::Entity)
        .order_by_asc(specialization::Column::Name)
        .all(db)
        .await?)
}

/// Applies every non-blank proposed value to the employee and marks the
/// draft approved, atomically. The status flips first, so a concurrent
/// decision on the same draft fails before any employee field is written.
pub async fn approve_draft<C>(
    db: &C,
    draft_id: Uuid,
) -> HrResult<(employee_draft::Model, employee::Model)>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let draft = find_draft(&txn, draft_id).await?;
    let decided = decide(&txn, &draft, DraftStatus::Approved).await?;
    let current = find_employee(&txn, draft.employee_id).await?;

    let mut next = current.clone();
    if let Some(full_name) = &draft.full_name {
        next.full_name = full_name.clone();
    }
    if draft.position_id.is_some() {
        next.position_id = draft.position_id;
    }
    if let Some(manager_id) = draft.manager_id {
        ensure_no_manager_cycle(&txn, current.id, manager_id).await?;
        next.manager_id = Some(manager_id);
    }
    if let Some(city) = draft.workplace_city {
        next.workplace_city = city;
    }
    if let Some(country) = &draft.workplace_country {
        next.workplace_country = country.clone();
    }
    if let Some(nick) = &draft.telegram_nick {
        next.telegram_nick = nick.clone();
    }
    if let Some(about) = &draft.about {
        next.about = about.clone();
    }
    next.validate()?;
    let employee = save_changes(&txn, current, next).await?;

    let proposed = draft.find_related(specialization::Entity).all(&txn).await?;
    if !proposed.is_empty() {
        employee_specialization::Entity::delete_many()
            .filter(employee_specialization::Column::EmployeeId.eq(employee.id))
            .exec(&txn)
            .await?;
        let codes: Vec<SpecializationCode> = proposed.iter().map(|row| row.name).collect();
        link_specializations(&txn, employee.id, &codes).await?;
    }

    txn.commit().await?;
    info!(%draft_id, employee_id = %employee.id, "draft approved");
    Ok((decided, employee))
}

/// Closes a pending draft without touching the employee.
pub async fn reject_draft<C>(db: &C, draft_id: Uuid) -> HrResult<employee_draft::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let draft = find_draft(&txn, draft_id).await?;
    let decided = decide(&txn, &draft, DraftStatus::Rejected).await?;
    txn.commit().await?;
    info!(%draft_id, "draft rejected");
    Ok(decided)
}

fn check_transition(draft: &employee_draft::Model, next: DraftStatus) -> HrResult<()> {
    if draft.status.can_transition_to(next) {
        return Ok(());
    }
    warn!(draft_id = %draft.id, from = ?draft.status, to = ?next, "illegal draft transition");
    Err(HrError::InvalidTransition {
        id: draft.id,
        from: draft.status,
        to: next,
    })
}

/// Moves `draft` to `status`. `draft` may be stale: the write only lands
/// while the stored row is still pending.
async fn decide<C: ConnectionTrait>(
    db: &C,
    draft: &employee_draft::Model,
    status: DraftStatus,
) -> HrResult<employee_draft::Model> {
    check_transition(draft, status)?;
    let mut active: employee_draft::ActiveModel = draft.clone().into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    if !write_if_pending(db, draft.id, active).await? {
        let current = find_draft(db, draft.id).await?;
        warn!(draft_id = %draft.id, from = ?current.status, to = ?status, "draft already decided");
        return Err(HrError::InvalidTransition {
            id: draft.id,
            from: current.status,
            to: status,
        });
    }
    find_draft(db, draft.id).await
}

/// Writes the `Set` columns of `active` only if the row is still pending.
/// Returns `false` when another writer decided the draft first.
async fn write_if_pending<C: ConnectionTrait>(
    db: &C,
    draft_id: Uuid,
    active: employee_draft::ActiveModel,
) -> HrResult<bool> {
    let result = employee_draft::Entity::update_many()
        .set(active)
        .filter(employee_draft::Column::Id.eq(draft_id))
        .filter(employee_draft::Column::Status.eq(DraftStatus::Pending))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

async fn link_draft_specializations<C: ConnectionTrait>(
    db: &C,
    draft_id: Uuid,
    codes: &[SpecializationCode],
) -> HrResult<()> {
    let rows = resolve_specializations(db, codes).await?;
    if rows.is_empty() {
        return Ok(());
    }
    employee_draft_specialization::Entity::insert_many(rows.iter().map(|row| {
        employee_draft_specialization::ActiveModel {
            draft_id: Set(draft_id),
            specialization_id: Set(row.id),
        }
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}
