use std::collections::HashSet;

use entity::employee::{self, City, DEFAULT_COUNTRY};
use entity::position::{self, PositionCode};
use entity::specialization::{self, SpecializationCode};
use entity::{Choice, employee_specialization};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{find_position, resolve_specializations};
use crate::users::find_user;
use crate::{HrError, HrResult};

#[derive(Clone, Debug, Deserialize)]
pub struct NewEmployee {
    pub user_id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub position: Option<PositionCode>,
    #[serde(default)]
    pub specializations: Vec<SpecializationCode>,
    #[serde(default)]
    pub manager_id: Option<Uuid>,
    #[serde(default)]
    pub created_by_id: Option<Uuid>,
    pub workplace_city: City,
    #[serde(default)]
    pub workplace_country: Option<String>,
    #[serde(default)]
    pub telegram_nick: String,
    #[serde(default)]
    pub about: String,
}

impl NewEmployee {
    pub fn new(user_id: Uuid, full_name: impl Into<String>, workplace_city: City) -> Self {
        Self {
            user_id,
            full_name: full_name.into(),
            position: None,
            specializations: Vec::new(),
            manager_id: None,
            created_by_id: None,
            workplace_city,
            workplace_country: None,
            telegram_nick: String::new(),
            about: String::new(),
        }
    }
}

/// Field-wise patch; `None` leaves a field untouched.
/// `position: Some(None)` clears the position.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeePatch {
    pub full_name: Option<String>,
    pub position: Option<Option<PositionCode>>,
    pub workplace_city: Option<City>,
    pub workplace_country: Option<String>,
    pub telegram_nick: Option<String>,
    pub about: Option<String>,
}

/// Flattened row for listings.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub short_name: String,
    pub position: Option<&'static str>,
    pub city: &'static str,
    pub telegram_nick: String,
}

/// Creates the employee record for a staff user.
pub async fn provision_employee<C>(db: &C, input: NewEmployee) -> HrResult<employee::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let user = find_user(&txn, input.user_id).await?;
    if !user.is_staff {
        warn!(user_id = %user.id, "refusing to provision non-staff user");
        return Err(HrError::NotStaff(user.id));
    }
    let existing = employee::Entity::find()
        .filter(employee::Column::UserId.eq(user.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(HrError::AlreadyProvisioned(user.id));
    }

    let position_id = match input.position {
        Some(code) => Some(find_position(&txn, code).await?.id),
        None => None,
    };
    if let Some(manager_id) = input.manager_id {
        find_employee(&txn, manager_id).await?;
    }
    if let Some(creator_id) = input.created_by_id {
        find_employee(&txn, creator_id).await?;
    }

    let country = input
        .workplace_country
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let model = employee::Model {
        id: Uuid::new_v4(),
        user_id: user.id,
        full_name: input.full_name.trim().to_string(),
        position_id,
        manager_id: input.manager_id,
        created_by_id: input.created_by_id,
        workplace_city: input.workplace_city,
        workplace_country: country,
        telegram_nick: input.telegram_nick.trim().to_string(),
        about: input.about,
    };
    model.validate()?;

    let created = employee::ActiveModel {
        id: Set(model.id),
        user_id: Set(model.user_id),
        full_name: Set(model.full_name),
        position_id: Set(model.position_id),
        manager_id: Set(model.manager_id),
        created_by_id: Set(model.created_by_id),
        workplace_city: Set(model.workplace_city),
        workplace_country: Set(model.workplace_country),
        telegram_nick: Set(model.telegram_nick),
        about: Set(model.about),
    }
    .insert(&txn)
    .await?;
    link_specializations(&txn, created.id, &input.specializations).await?;
    txn.commit().await?;
    info!(employee_id = %created.id, user_id = %user.id, "employee provisioned");
    Ok(created)
}

pub async fn find_employee<C: ConnectionTrait>(db: &C, id: Uuid) -> HrResult<employee::Model> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found("employee", id))
}

pub async fn find_employee_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> HrResult<Option<employee::Model>> {
    Ok(employee::Entity::find()
        .filter(employee::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

/// All employees, ordered by full name.
pub async fn list_employees<C: ConnectionTrait>(db: &C) -> HrResult<Vec<employee::Model>> {
    Ok(employee::Entity::find()
        .order_by_asc(employee::Column::FullName)
        .all(db)
        .await?)
}

pub async fn list_employee_summaries<C: ConnectionTrait>(
    db: &C,
) -> HrResult<Vec<EmployeeSummary>> {
    let rows = employee::Entity::find()
        .find_also_related(position::Entity)
        .order_by_asc(employee::Column::FullName)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(employee, position)| EmployeeSummary {
            id: employee.id,
            short_name: employee.short_name(),
            position: position.map(|p| p.name.label()),
            city: employee.workplace_city.label(),
            telegram_nick: employee.telegram_nick,
        })
        .collect())
}

pub async fn update_employee<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    patch: EmployeePatch,
) -> HrResult<employee::Model> {
    let existing = find_employee(db, id).await?;
    let mut next = existing.clone();
    if let Some(full_name) = patch.full_name {
        next.full_name = full_name.trim().to_string();
    }
    if let Some(position) = patch.position {
        next.position_id = match position {
            Some(code) => Some(find_position(db, code).await?.id),
            None => None,
        };
    }
    if let Some(city) = patch.workplace_city {
        next.workplace_city = city;
    }
    if let Some(country) = patch.workplace_country {
        next.workplace_country = country.trim().to_string();
    }
    if let Some(nick) = patch.telegram_nick {
        next.telegram_nick = nick.trim().to_string();
    }
    if let Some(about) = patch.about {
        next.about = about;
    }
    next.validate()?;
    if next == existing {
        return Ok(existing);
    }
    let updated = save_changes(db, existing, next).await?;
    info!(employee_id = %id, "employee updated");
    Ok(updated)
}

/// Writes only the columns that differ between `before` and `after`.
pub(crate) async fn save_changes<C: ConnectionTrait>(
    db: &C,
    before: employee::Model,
    after: employee::Model,
) -> HrResult<employee::Model> {
    let mut active: employee::ActiveModel = before.clone().into();
    if before.full_name != after.full_name {
        active.full_name = Set(after.full_name);
    }
    if before.position_id != after.position_id {
        active.position_id = Set(after.position_id);
    }
    if before.manager_id != after.manager_id {
        active.manager_id = Set(after.manager_id);
    }
    if before.workplace_city != after.workplace_city {
        active.workplace_city = Set(after.workplace_city);
    }
    if before.workplace_country != after.workplace_country {
        active.workplace_country = Set(after.workplace_country);
    }
    if before.telegram_nick != after.telegram_nick {
        active.telegram_nick = Set(after.telegram_nick);
    }
    if before.about != after.about {
        active.about = Set(after.about);
    }
    if !active.is_changed() {
        return Ok(before);
    }
    Ok(active.update(db).await?)
}

/// Points `employee_id` at a new manager, or detaches it with `None`.
pub async fn assign_manager<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    manager_id: Option<Uuid>,
) -> HrResult<employee::Model> {
    let existing = find_employee(db, employee_id).await?;
    if let Some(manager_id) = manager_id {
        ensure_no_manager_cycle(db, employee_id, manager_id).await?;
    }
    let mut active: employee::ActiveModel = existing.into();
    active.manager_id = Set(manager_id);
    let updated = active.update(db).await?;
    info!(%employee_id, manager_id = ?manager_id, "manager assigned");
    Ok(updated)
}

/// Walks the reporting line upward from `manager_id` and fails if it reaches
/// `employee_id`. A loop elsewhere in the chain ends the walk.
pub(crate) async fn ensure_no_manager_cycle<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    manager_id: Uuid,
) -> HrResult<()> {
    let mut seen = HashSet::new();
    let mut cursor = Some(manager_id);
    while let Some(current) = cursor {
        if current == employee_id {
            warn!(%employee_id, %manager_id, "manager assignment rejected: cycle");
            return Err(HrError::ManagerCycle {
                employee_id,
                manager_id,
            });
        }
        if !seen.insert(current) {
            break;
        }
        cursor = find_employee(db, current).await?.manager_id;
    }
    Ok(())
}

pub async fn manager_of<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
) -> HrResult<Option<employee::Model>> {
    let employee = find_employee(db, employee_id).await?;
    Ok(employee.find_linked(employee::ManagerLink).one(db).await?)
}

pub async fn creator_of<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
) -> HrResult<Option<employee::Model>> {
    let employee = find_employee(db, employee_id).await?;
    Ok(employee.find_linked(employee::CreatedByLink).one(db).await?)
}

/// Managers from the direct one upward.
pub async fn reporting_chain<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
) -> HrResult<Vec<employee::Model>> {
    let mut chain: Vec<employee::Model> = Vec::new();
    let mut cursor = find_employee(db, employee_id).await?.manager_id;
    while let Some(id) = cursor {
        if id == employee_id || chain.iter().any(|m| m.id == id) {
            break;
        }
        let manager = find_employee(db, id).await?;
        cursor = manager.manager_id;
        chain.push(manager);
    }
    Ok(chain)
}

pub async fn subordinates_of<C: ConnectionTrait>(
    db: &C,
    manager_id: Uuid,
) -> HrResult<Vec<employee::Model>> {
    Ok(employee::Entity::find()
        .filter(employee::Column::ManagerId.eq(manager_id))
        .order_by_asc(employee::Column::FullName)
        .all(db)
        .await?)
}

pub async fn specializations_of<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
) -> HrResult<Vec<specialization::Model>> {
    let employee = find_employee(db, employee_id).await?;
    Ok(employee
        .find_related(specialization::Entity)
        .order_by_asc(specialization::Column::Name)
        .all(db)
        .await?)
}

/// Replaces the employee's specialization set.
pub async fn set_specializations<C>(
    db: &C,
    employee_id: Uuid,
    codes: &[SpecializationCode],
) -> HrResult<Vec<specialization::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    find_employee(&txn, employee_id).await?;
    employee_specialization::Entity::delete_many()
        .filter(employee_specialization::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    let linked = link_specializations(&txn, employee_id, codes).await?;
    txn.commit().await?;
    info!(%employee_id, count = linked.len(), "specializations replaced");
    Ok(linked)
}

pub(crate) async fn link_specializations<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    codes: &[SpecializationCode],
) -> HrResult<Vec<specialization::Model>> {
    let rows = resolve_specializations(db, codes).await?;
    if rows.is_empty() {
        return Ok(rows);
    }
    employee_specialization::Entity::insert_many(rows.iter().map(|row| {
        employee_specialization::ActiveModel {
            employee_id: Set(employee_id),
            specialization_id: Set(row.id),
        }
    }))
    .exec_without_returning(db)
    .await?;
    Ok(rows)
}

pub async fn delete_employee<C: ConnectionTrait>(db: &C, id: Uuid) -> HrResult<()> {
    let result = employee::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(HrError::not_found("employee", id));
    }
    info!(employee_id = %id, "employee deleted");
    Ok(())
}
