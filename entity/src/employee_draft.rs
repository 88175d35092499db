//! Proposed employee edits awaiting a decision.

use std::str::FromStr;

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::employee::City;
use crate::validation::{self, ABOUT_MAX, COUNTRY_MAX, FULL_NAME_MAX, ValidationError};
use crate::{Choice, parse_choice};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employee_draft")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub employee_id: Uuid,
    pub full_name: Option<String>,
    pub position_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub workplace_city: Option<City>,
    pub workplace_country: Option<String>,
    pub telegram_nick: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,
    pub status: DraftStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::ManagerId",
        to = "super::employee::Column::Id",
        on_delete = "SetNull"
    )]
    Manager,
    #[sea_orm(
        belongs_to = "super::position::Entity",
        from = "Column::PositionId",
        to = "super::position::Column::Id",
        on_delete = "SetNull"
    )]
    Position,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl Related<super::specialization::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_draft_specialization::Relation::Specialization.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_draft_specialization::Relation::Draft.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Blank values mean "leave unchanged", so only present fields are checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(full_name) = &self.full_name {
            validation::validate_max_chars("full_name", full_name, FULL_NAME_MAX)?;
        }
        if let Some(country) = &self.workplace_country {
            validation::validate_max_chars("workplace_country", country, COUNTRY_MAX)?;
        }
        if let Some(nick) = &self.telegram_nick {
            validation::validate_telegram_nick(nick)?;
        }
        if let Some(about) = &self.about {
            validation::validate_max_chars("about", about, ABOUT_MAX)?;
        }
        Ok(())
    }

    /// `"Черновик для <full name>"`, given the owning employee.
    pub fn title_for(&self, employee: &super::employee::Model) -> String {
        format!("Черновик для {}", employee.full_name)
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl DraftStatus {
    /// Only pending drafts move, and only to a decision.
    pub fn can_transition_to(self, next: DraftStatus) -> bool {
        matches!(
            (self, next),
            (DraftStatus::Pending, DraftStatus::Approved)
                | (DraftStatus::Pending, DraftStatus::Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, DraftStatus::Pending)
    }
}

impl Choice for DraftStatus {
    fn label(self) -> &'static str {
        match self {
            DraftStatus::Pending => "Ожидает подтверждения",
            DraftStatus::Approved => "Подтверждено",
            DraftStatus::Rejected => "Отклонено",
        }
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl FromStr for DraftStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("status", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_pending() {
        assert_eq!(DraftStatus::default(), DraftStatus::Pending);
        assert_eq!(DraftStatus::default().to_value(), "pending");
    }

    #[test]
    fn pending_moves_to_a_decision_only() {
        assert!(DraftStatus::Pending.can_transition_to(DraftStatus::Approved));
        assert!(DraftStatus::Pending.can_transition_to(DraftStatus::Rejected));
        assert!(!DraftStatus::Pending.can_transition_to(DraftStatus::Pending));
    }

    #[test]
    fn decisions_are_terminal() {
        for from in [DraftStatus::Approved, DraftStatus::Rejected] {
            assert!(from.is_terminal());
            for to in DraftStatus::all() {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn status_codes_parse() {
        assert_eq!("approved".parse::<DraftStatus>(), Ok(DraftStatus::Approved));
        assert!("archived".parse::<DraftStatus>().is_err());
    }
}
