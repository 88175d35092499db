use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employee_draft_specialization")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub draft_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub specialization_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee_draft::Entity",
        from = "Column::DraftId",
        to = "super::employee_draft::Column::Id",
        on_delete = "Cascade"
    )]
    Draft,
    #[sea_orm(
        belongs_to = "super::specialization::Entity",
        from = "Column::SpecializationId",
        to = "super::specialization::Column::Id",
        on_delete = "Cascade"
    )]
    Specialization,
}

impl Related<super::employee_draft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Draft.def()
    }
}

impl Related<super::specialization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Specialization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
