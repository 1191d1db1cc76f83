use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_player_scores_table(manager).await?;
        self.create_indexes(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayerScores::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    // Helper functions for database-specific types
    fn create_id_column(&self, manager: &SchemaManager<'_>, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => col.uuid().not_null(),
            _ => col.string().not_null(),
        };
        col
    }

    fn create_datetime_column(&self, manager: &SchemaManager<'_>, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => col.timestamp_with_time_zone().not_null(),
            _ => col.string().not_null(),
        };
        col
    }

    async fn create_player_scores_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlayerScores::Table)
                    .if_not_exists()
                    .col(
                        self.create_id_column(manager, PlayerScores::Id)
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlayerScores::ClientIp)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PlayerScores::Name).string().not_null())
                    .col(ColumnDef::new(PlayerScores::Score).big_integer().not_null())
                    .col(self.create_datetime_column(manager, PlayerScores::CreatedAt))
                    .col(self.create_datetime_column(manager, PlayerScores::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn create_indexes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        // Covers the top-N query: score descending, earlier update wins ties
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_player_scores_ranking")
                    .table(PlayerScores::Table)
                    .col((PlayerScores::Score, IndexOrder::Desc))
                    .col((PlayerScores::UpdatedAt, IndexOrder::Asc))
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum PlayerScores {
    Table,
    Id,
    ClientIp,
    Name,
    Score,
    CreatedAt,
    UpdatedAt,
}
