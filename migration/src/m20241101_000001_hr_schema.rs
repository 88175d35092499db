use sea_orm_migration::prelude::*;

const DEFAULT_COUNTRY: &str = "Russia";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(User::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Email).string_len(254))
                    .col(
                        ColumnDef::new(User::IsStaff)
                            .boolean()
                            .not_null()
                            .default(Expr::value(false)),
                    )
                    .col(
                        ColumnDef::new(User::IsActive)
                            .boolean()
                            .not_null()
                            .default(Expr::value(true)),
                    )
                    .col(
                        ColumnDef::new(User::DateJoined)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Position::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Position::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Position::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Specialization::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Specialization::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Specialization::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employee::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employee::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Employee::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(Employee::PositionId).uuid())
                    .col(ColumnDef::new(Employee::ManagerId).uuid())
                    .col(ColumnDef::new(Employee::CreatedById).uuid())
                    .col(
                        ColumnDef::new(Employee::WorkplaceCity)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employee::WorkplaceCountry)
                            .string_len(100)
                            .not_null()
                            .default(DEFAULT_COUNTRY),
                    )
                    .col(
                        ColumnDef::new(Employee::TelegramNick)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Employee::About).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_user")
                            .from(Employee::Table, Employee::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_position")
                            .from(Employee::Table, Employee::PositionId)
                            .to(Position::Table, Position::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_manager")
                            .from(Employee::Table, Employee::ManagerId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_created_by")
                            .from(Employee::Table, Employee::CreatedById)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_employee_full_name", Employee::FullName),
            ("idx_employee_position", Employee::PositionId),
            ("idx_employee_manager", Employee::ManagerId),
            ("idx_employee_created_by", Employee::CreatedById),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Employee::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(EmployeeSpecialization::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeSpecialization::EmployeeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeSpecialization::SpecializationId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EmployeeSpecialization::EmployeeId)
                            .col(EmployeeSpecialization::SpecializationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_specialization_employee")
                            .from(
                                EmployeeSpecialization::Table,
                                EmployeeSpecialization::EmployeeId,
                            )
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_specialization_specialization")
                            .from(
                                EmployeeSpecialization::Table,
                                EmployeeSpecialization::SpecializationId,
                            )
                            .to(Specialization::Table, Specialization::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeDraft::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeDraft::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmployeeDraft::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(EmployeeDraft::FullName).string_len(255))
                    .col(ColumnDef::new(EmployeeDraft::PositionId).uuid())
                    .col(ColumnDef::new(EmployeeDraft::ManagerId).uuid())
                    .col(ColumnDef::new(EmployeeDraft::WorkplaceCity).string_len(100))
                    .col(ColumnDef::new(EmployeeDraft::WorkplaceCountry).string_len(100))
                    .col(ColumnDef::new(EmployeeDraft::TelegramNick).string_len(100))
                    .col(ColumnDef::new(EmployeeDraft::About).text())
                    .col(
                        ColumnDef::new(EmployeeDraft::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(EmployeeDraft::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(EmployeeDraft::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_draft_employee")
                            .from(EmployeeDraft::Table, EmployeeDraft::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_draft_position")
                            .from(EmployeeDraft::Table, EmployeeDraft::PositionId)
                            .to(Position::Table, Position::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_draft_manager")
                            .from(EmployeeDraft::Table, EmployeeDraft::ManagerId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_draft_employee")
                    .table(EmployeeDraft::Table)
                    .col(EmployeeDraft::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_draft_status")
                    .table(EmployeeDraft::Table)
                    .col(EmployeeDraft::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeDraftSpecialization::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeDraftSpecialization::DraftId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeDraftSpecialization::SpecializationId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EmployeeDraftSpecialization::DraftId)
                            .col(EmployeeDraftSpecialization::SpecializationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_draft_specialization_draft")
                            .from(
                                EmployeeDraftSpecialization::Table,
                                EmployeeDraftSpecialization::DraftId,
                            )
                            .to(EmployeeDraft::Table, EmployeeDraft::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_draft_specialization_specialization")
                            .from(
                                EmployeeDraftSpecialization::Table,
                                EmployeeDraftSpecialization::SpecializationId,
                            )
                            .to(Specialization::Table, Specialization::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(EmployeeDraftSpecialization::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(EmployeeDraft::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(EmployeeSpecialization::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Employee::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Specialization::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Position::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Email,
    IsStaff,
    IsActive,
    DateJoined,
}

#[derive(DeriveIden)]
enum Position {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Specialization {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    UserId,
    FullName,
    PositionId,
    ManagerId,
    CreatedById,
    WorkplaceCity,
    WorkplaceCountry,
    TelegramNick,
    About,
}

#[derive(DeriveIden)]
enum EmployeeSpecialization {
    Table,
    EmployeeId,
    SpecializationId,
}

#[derive(DeriveIden)]
enum EmployeeDraft {
    Table,
    Id,
    EmployeeId,
    FullName,
    PositionId,
    ManagerId,
    WorkplaceCity,
    WorkplaceCountry,
    TelegramNick,
    About,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmployeeDraftSpecialization {
    Table,
    DraftId,
    SpecializationId,
}
