use std::fmt;
use std::str::FromStr;

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Choice, ValidationError, parse_choice};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "position")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: PositionCode,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Employee,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employee => Entity::has_many(super::employee::Entity).into(),
        }
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.label())
    }
}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(50))")]
#[serde(rename_all = "snake_case")]
pub enum PositionCode {
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "senior_dev")]
    SeniorDev,
    #[sea_orm(string_value = "middle_dev")]
    MiddleDev,
    #[sea_orm(string_value = "junior_dev")]
    JuniorDev,
}

impl Choice for PositionCode {
    fn label(self) -> &'static str {
        match self {
            PositionCode::Manager => "Менеджер",
            PositionCode::SeniorDev => "Senior-разработчик",
            PositionCode::MiddleDev => "Middle-разработчик",
            PositionCode::JuniorDev => "Junior-разработчик",
        }
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl FromStr for PositionCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("position", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_the_choice_table() {
        for code in ["manager", "senior_dev", "middle_dev", "junior_dev"] {
            let parsed: PositionCode = code.parse().unwrap();
            assert_eq!(parsed.to_value(), code);
        }
    }

    #[test]
    fn display_uses_the_label() {
        let model = Model {
            id: Uuid::nil(),
            name: PositionCode::SeniorDev,
        };
        assert_eq!(model.to_string(), "Senior-разработчик");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "cto".parse::<PositionCode>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidChoice {
                field: "position",
                value: "cto".into()
            }
        );
    }
}
