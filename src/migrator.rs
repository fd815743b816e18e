use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240401_000001_create_coordinators_table::Migration),
            Box::new(m20240401_000002_create_verifiers_table::Migration),
            Box::new(m20240401_000003_create_warehouses_table::Migration),
            Box::new(m20240401_000004_create_incident_types_table::Migration),
            Box::new(m20240401_000005_create_incident_records_table::Migration),
            Box::new(m20240401_000006_create_incident_actions_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240401_000001_create_coordinators_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240401_000001_create_coordinators_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Coordinators::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Coordinators::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Coordinators::Name).string().not_null())
                        .col(ColumnDef::new(Coordinators::Surnames).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Coordinators::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Coordinators {
        Table,
        Id,
        Name,
        Surnames,
    }
}

mod m20240401_000002_create_verifiers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240401_000002_create_verifiers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Verifiers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Verifiers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Verifiers::Name).string().not_null())
                        .col(ColumnDef::new(Verifiers::Surnames).string().not_null())
                        .col(
                            ColumnDef::new(Verifiers::Phone)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(Verifiers::Zone).string_len(32).null())
                        .to_owned(),
                )
                .await?;

            // Import dedup looks rows up by (name, surnames)
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_verifiers_name_surnames")
                        .table(Verifiers::Table)
                        .col(Verifiers::Name)
                        .col(Verifiers::Surnames)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Verifiers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Verifiers {
        Table,
        Id,
        Name,
        Surnames,
        Phone,
        Zone,
    }
}

mod m20240401_000003_create_warehouses_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240401_000003_create_warehouses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(
                            ColumnDef::new(Warehouses::CodigoConsejo)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Warehouses::Zone).string_len(32).null())
                        .to_owned(),
                )
                .await?;

            // Import dedup looks rows up by codigo_consejo
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_warehouses_codigo_consejo")
                        .table(Warehouses::Table)
                        .col(Warehouses::CodigoConsejo)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Warehouses {
        Table,
        Id,
        Name,
        CodigoConsejo,
        Zone,
    }
}

mod m20240401_000004_create_incident_types_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240401_000004_create_incident_types_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IncidentTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IncidentTypes::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(IncidentTypes::Code)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentTypes::Description)
                                .text()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // The unique index is the authoritative guard for code
            // allocation; the allocator's pre-check only improves messages.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_incident_types_code")
                        .table(IncidentTypes::Table)
                        .col(IncidentTypes::Code)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(IncidentTypes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum IncidentTypes {
        Table,
        Id,
        Code,
        Description,
    }
}

mod m20240401_000005_create_incident_records_table {

    use sea_orm_migration::prelude::*;

    use super::m20240401_000001_create_coordinators_table::Coordinators;
    use super::m20240401_000002_create_verifiers_table::Verifiers;
    use super::m20240401_000003_create_warehouses_table::Warehouses;
    use super::m20240401_000004_create_incident_types_table::IncidentTypes;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240401_000005_create_incident_records_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IncidentRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IncidentRecords::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(IncidentRecords::Date).date().not_null())
                        .col(
                            ColumnDef::new(IncidentRecords::RegisteringCoordinatorId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentRecords::WarehouseId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentRecords::CausingVerifierId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentRecords::IncidentTypeId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentRecords::AssignedCoordinatorId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentRecords::Explanation)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(IncidentRecords::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentRecords::Responsible)
                                .string_len(32)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_incident_records_registering_coordinator")
                                .from(
                                    IncidentRecords::Table,
                                    IncidentRecords::RegisteringCoordinatorId,
                                )
                                .to(Coordinators::Table, Coordinators::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_incident_records_warehouse")
                                .from(IncidentRecords::Table, IncidentRecords::WarehouseId)
                                .to(Warehouses::Table, Warehouses::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_incident_records_causing_verifier")
                                .from(IncidentRecords::Table, IncidentRecords::CausingVerifierId)
                                .to(Verifiers::Table, Verifiers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_incident_records_incident_type")
                                .from(IncidentRecords::Table, IncidentRecords::IncidentTypeId)
                                .to(IncidentTypes::Table, IncidentTypes::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_incident_records_assigned_coordinator")
                                .from(
                                    IncidentRecords::Table,
                                    IncidentRecords::AssignedCoordinatorId,
                                )
                                .to(Coordinators::Table, Coordinators::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_incident_records_incident_type_id")
                        .table(IncidentRecords::Table)
                        .col(IncidentRecords::IncidentTypeId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_incident_records_status")
                        .table(IncidentRecords::Table)
                        .col(IncidentRecords::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_incident_records_date")
                        .table(IncidentRecords::Table)
                        .col(IncidentRecords::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(IncidentRecords::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum IncidentRecords {
        Table,
        Id,
        Date,
        RegisteringCoordinatorId,
        WarehouseId,
        CausingVerifierId,
        IncidentTypeId,
        AssignedCoordinatorId,
        Explanation,
        Status,
        Responsible,
    }
}

mod m20240401_000006_create_incident_actions_table {

    use sea_orm_migration::prelude::*;

    use super::m20240401_000001_create_coordinators_table::Coordinators;
    use super::m20240401_000005_create_incident_records_table::IncidentRecords;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240401_000006_create_incident_actions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IncidentActions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IncidentActions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(IncidentActions::IncidentRecordId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentActions::ActionDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentActions::ActionDescription)
                                .text()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IncidentActions::NewStatus)
                                .string_len(32)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(IncidentActions::PerformedBy)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_incident_actions_incident_record")
                                .from(IncidentActions::Table, IncidentActions::IncidentRecordId)
                                .to(IncidentRecords::Table, IncidentRecords::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_incident_actions_performed_by")
                                .from(IncidentActions::Table, IncidentActions::PerformedBy)
                                .to(Coordinators::Table, Coordinators::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_incident_actions_record_date")
                        .table(IncidentActions::Table)
                        .col(IncidentActions::IncidentRecordId)
                        .col(IncidentActions::ActionDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(IncidentActions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum IncidentActions {
        Table,
        Id,
        IncidentRecordId,
        ActionDate,
        ActionDescription,
        NewStatus,
        PerformedBy,
    }
}
