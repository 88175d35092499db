use std::fmt;
use std::str::FromStr;

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::validation::{
    self, ABOUT_MAX, COUNTRY_MAX, FULL_NAME_MAX, ValidationError,
};
use crate::{Choice, parse_choice};

/// Country stored when the caller does not name one.
pub const DEFAULT_COUNTRY: &str = "Russia";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(indexed)]
    pub full_name: String,
    #[sea_orm(indexed)]
    pub position_id: Option<Uuid>,
    #[sea_orm(indexed)]
    pub manager_id: Option<Uuid>,
    pub created_by_id: Option<Uuid>,
    pub workplace_city: City,
    pub workplace_country: String,
    pub telegram_nick: String,
    #[sea_orm(column_type = "Text")]
    pub about: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::position::Entity",
        from = "Column::PositionId",
        to = "super::position::Column::Id",
        on_delete = "SetNull"
    )]
    Position,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ManagerId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Manager,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::CreatedById",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::employee_draft::Entity")]
    Draft,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl Related<super::employee_draft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Draft.def()
    }
}

impl Related<super::specialization::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_specialization::Relation::Specialization.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_specialization::Relation::Employee.def().rev())
    }
}

/// Employee -> direct manager.
#[derive(Debug)]
pub struct ManagerLink;

impl Linked for ManagerLink {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::Manager.def()]
    }
}

/// Employee -> the employee who created the record.
#[derive(Debug)]
pub struct CreatedByLink;

impl Linked for CreatedByLink {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::CreatedBy.def()]
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Surname plus initials, e.g. "Волков Я. В.".
    pub fn short_name(&self) -> String {
        short_name(&self.full_name)
    }

    /// Checks the free-text fields the store does not constrain on its own.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.full_name,
            &self.workplace_country,
            &self.telegram_nick,
            &self.about,
        )
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

pub fn validate_fields(
    full_name: &str,
    country: &str,
    telegram_nick: &str,
    about: &str,
) -> Result<(), ValidationError> {
    validation::validate_required("full_name", full_name)?;
    validation::validate_max_chars("full_name", full_name, FULL_NAME_MAX)?;
    validation::validate_required("workplace_country", country)?;
    validation::validate_max_chars("workplace_country", country, COUNTRY_MAX)?;
    validation::validate_telegram_nick(telegram_nick)?;
    validation::validate_max_chars("about", about, ABOUT_MAX)?;
    Ok(())
}

/// Names with three or more whitespace separated parts collapse to
/// `"<first> <X>. <Y>."`; anything shorter is returned as is.
pub fn short_name(full_name: &str) -> String {
    let mut parts = full_name.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(surname), Some(first), Some(patronymic)) => {
            let initial = |part: &str| part.chars().next().unwrap_or_default();
            format!("{surname} {}. {}.", initial(first), initial(patronymic))
        }
        _ => full_name.to_string(),
    }
}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(100))")]
#[serde(rename_all = "snake_case")]
pub enum City {
    #[sea_orm(string_value = "moscow")]
    Moscow,
    #[sea_orm(string_value = "spb")]
    Spb,
    #[sea_orm(string_value = "paris")]
    Paris,
}

impl Choice for City {
    fn label(self) -> &'static str {
        match self {
            City::Moscow => "Москва",
            City::Spb => "Санкт-Петербург",
            City::Paris => "Париж",
        }
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl FromStr for City {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("workplace_city", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(full_name: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: full_name.into(),
            position_id: None,
            manager_id: None,
            created_by_id: None,
            workplace_city: City::Moscow,
            workplace_country: DEFAULT_COUNTRY.into(),
            telegram_nick: String::new(),
            about: String::new(),
        }
    }

    #[test]
    fn short_name_uses_initials_for_three_parts() {
        assert_eq!(
            employee("Волков Ярослав Владимирович").short_name(),
            "Волков Я. В."
        );
    }

    #[test]
    fn short_name_passes_short_names_through() {
        assert_eq!(short_name("Иванов"), "Иванов");
        assert_eq!(short_name("Иванов Иван"), "Иванов Иван");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn short_name_ignores_extra_parts() {
        assert_eq!(short_name("Гарсиа Мария Луиза Лопес"), "Гарсиа М. Л.");
        assert_eq!(short_name("  Петров   Пётр  Петрович "), "Петров П. П.");
    }

    #[test]
    fn validate_requires_a_country() {
        let mut model = employee("Иванов Иван");
        model.workplace_country = "  ".into();
        assert_eq!(
            model.validate(),
            Err(ValidationError::Required {
                field: "workplace_country"
            })
        );
    }

    #[test]
    fn display_is_full_name() {
        assert_eq!(employee("Иванов Иван").to_string(), "Иванов Иван");
    }

    #[test]
    fn validate_rejects_bad_telegram_nick() {
        let mut model = employee("Иванов Иван");
        model.telegram_nick = "ivan".into();
        assert_eq!(model.validate(), Err(ValidationError::TelegramNick));
        model.telegram_nick = "@ivan".into();
        assert_eq!(model.validate(), Ok(()));
    }

    #[test]
    fn city_labels() {
        assert_eq!("spb".parse::<City>().unwrap().label(), "Санкт-Петербург");
        assert!("london".parse::<City>().is_err());
    }
}
