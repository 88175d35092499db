use std::fmt;
use std::str::FromStr;

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Choice, ValidationError, parse_choice};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "specialization")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: SpecializationCode,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_specialization::Relation::Employee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_specialization::Relation::Specialization.def().rev())
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
pub enum SpecializationCode {
    #[sea_orm(string_value = "python")]
    Python,
    #[sea_orm(string_value = "devops")]
    Devops,
    #[sea_orm(string_value = "go")]
    Go,
    #[sea_orm(string_value = "data_engineer")]
    DataEngineer,
}

impl Choice for SpecializationCode {
    fn label(self) -> &'static str {
        match self {
            SpecializationCode::Python => "Python",
            SpecializationCode::Devops => "DevOps",
            SpecializationCode::Go => "Go",
            SpecializationCode::DataEngineer => "Data Engineer",
        }
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl FromStr for SpecializationCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("specialization", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_from_codes() {
        let python: SpecializationCode = "python".parse().unwrap();
        let go: SpecializationCode = "go".parse().unwrap();
        assert_eq!(python.label(), "Python");
        assert_eq!(go.label(), "Go");
    }

    #[test]
    fn unknown_code_is_not_a_valid_choice() {
        assert!("rust".parse::<SpecializationCode>().is_err());
        assert!("Python".parse::<SpecializationCode>().is_err());
    }

    #[test]
    fn choice_table_is_closed() {
        let codes: Vec<String> = SpecializationCode::all()
            .into_iter()
            .map(|code| code.to_value())
            .collect();
        assert_eq!(codes, ["python", "devops", "go", "data_engineer"]);
    }
}
