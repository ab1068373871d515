use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Surname).string().not_null())
                    .col(ColumnDef::new(Users::Patronymic).string())
                    .col(ColumnDef::new(Users::Age).integer().not_null().default(0))
                    .col(ColumnDef::new(Users::Gender).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Users::Nationality)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::NameKey).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Users::SurnameKey)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::PatronymicKey)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup path for the full-name uniqueness probe
        manager
            .create_index(
                Index::create()
                    .name("idx_users_full_name")
                    .table(Users::Table)
                    .col(Users::Name)
                    .col(Users::Surname)
                    .col(Users::Patronymic)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Surname,
    Patronymic,
    Age,
    Gender,
    Nationality,
    CreatedAt,
    UpdatedAt,
    NameKey,
    SurnameKey,
    PatronymicKey,
}
