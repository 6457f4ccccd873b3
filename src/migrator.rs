use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_clients_table::Migration),
            Box::new(m20240301_000002_create_inbound_tables::Migration),
            Box::new(m20240301_000003_create_package_tables::Migration),
            Box::new(m20240301_000004_create_products_and_inventory::Migration),
            Box::new(m20240301_000005_create_inspections_table::Migration),
            Box::new(m20240301_000006_create_outbound_tables::Migration),
            Box::new(m20240301_000007_create_finance_tables::Migration),
            Box::new(m20240301_000008_create_operation_logs_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240301_000001_create_clients_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_clients_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Clients::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Clients::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Clients::DefaultLocation).string())
                        .col(ColumnDef::new(Clients::Contact).string())
                        .col(
                            ColumnDef::new(Clients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Clients {
        Table,
        Id,
        Name,
        DefaultLocation,
        Contact,
        CreatedAt,
    }
}

mod m20240301_000002_create_inbound_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_inbound_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InboundOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InboundOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrders::OrderNo)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(InboundOrders::ClientId).string().not_null())
                        .col(
                            ColumnDef::new(InboundOrders::InboundType)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundOrders::TrackingNo).string())
                        .col(ColumnDef::new(InboundOrders::Carrier).string())
                        .col(
                            ColumnDef::new(InboundOrders::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundOrders::ExpectedDate).timestamp_with_time_zone())
                        .col(ColumnDef::new(InboundOrders::Remark).string())
                        .col(ColumnDef::new(InboundOrders::CreatedBy).string().not_null())
                        .col(
                            ColumnDef::new(InboundOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundOrders::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inbound_orders_tracking_no")
                        .table(InboundOrders::Table)
                        .col(InboundOrders::TrackingNo)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InboundItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InboundItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(InboundItems::Sku).string().not_null())
                        .col(
                            ColumnDef::new(InboundItems::ExpectedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InboundItems::ReceivedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InboundItems::PassedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InboundItems::FailedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InboundItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inbound_items_order_sku")
                        .table(InboundItems::Table)
                        .col(InboundItems::OrderId)
                        .col(InboundItems::Sku)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InboundItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InboundOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum InboundOrders {
        Table,
        Id,
        OrderNo,
        ClientId,
        InboundType,
        TrackingNo,
        Carrier,
        Status,
        ExpectedDate,
        Remark,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum InboundItems {
        Table,
        Id,
        OrderId,
        Sku,
        ExpectedQty,
        ReceivedQty,
        PassedQty,
        FailedQty,
        CreatedAt,
    }
}

mod m20240301_000003_create_package_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_package_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Packages::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Packages::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Packages::TrackingNo)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Packages::Client).string().not_null())
                        .col(ColumnDef::new(Packages::Carrier).string())
                        .col(
                            ColumnDef::new(Packages::PackageType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Packages::Status).string_len(32).not_null())
                        .col(ColumnDef::new(Packages::Location).string())
                        .col(ColumnDef::new(Packages::InboundOrderId).uuid())
                        .col(ColumnDef::new(Packages::Receipt).string())
                        .col(
                            ColumnDef::new(Packages::IsAbnormal)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Packages::Reason).string())
                        .col(ColumnDef::new(Packages::Operator).string().not_null())
                        .col(ColumnDef::new(Packages::CountedAt).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(Packages::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Packages::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Items::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Items::PackageId).uuid().not_null())
                        .col(ColumnDef::new(Items::TrackingNo).string().not_null())
                        .col(ColumnDef::new(Items::Sku).string().not_null())
                        .col(ColumnDef::new(Items::Lpn).string())
                        .col(ColumnDef::new(Items::Qty).integer().not_null())
                        .col(ColumnDef::new(Items::Remark).string())
                        .col(ColumnDef::new(Items::ReturnType).string_len(16).not_null())
                        .col(
                            ColumnDef::new(Items::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_items_package_id")
                        .table(Items::Table)
                        .col(Items::PackageId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Packages::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Packages {
        Table,
        Id,
        TrackingNo,
        Client,
        Carrier,
        PackageType,
        Status,
        Location,
        InboundOrderId,
        Receipt,
        IsAbnormal,
        Reason,
        Operator,
        CountedAt,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Items {
        Table,
        Id,
        PackageId,
        TrackingNo,
        Sku,
        Lpn,
        Qty,
        Remark,
        ReturnType,
        CreatedAt,
    }
}

mod m20240301_000004_create_products_and_inventory {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_products_and_inventory"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Client).string().not_null())
                        .col(ColumnDef::new(Products::Sku).string().not_null())
                        .col(ColumnDef::new(Products::Name).string())
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_client_sku")
                        .table(Products::Table)
                        .col(Products::Client)
                        .col(Products::Sku)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Inventory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inventory::Id)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Inventory::Client).string().not_null())
                        .col(ColumnDef::new(Inventory::Sku).string().not_null())
                        .col(ColumnDef::new(Inventory::Location).string().not_null())
                        .col(
                            ColumnDef::new(Inventory::Qty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Inventory::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_client_sku")
                        .table(Inventory::Table)
                        .col(Inventory::Client)
                        .col(Inventory::Sku)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Inventory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Products {
        Table,
        Id,
        Client,
        Sku,
        Name,
        CreatedAt,
    }

    #[derive(Iden)]
    enum Inventory {
        Table,
        Id,
        Client,
        Sku,
        Location,
        Qty,
        UpdatedAt,
    }
}

mod m20240301_000005_create_inspections_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_inspections_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inspections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inspections::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Inspections::TargetItemId).uuid().not_null())
                        .col(
                            ColumnDef::new(Inspections::Status)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Inspections::Grade).string())
                        .col(ColumnDef::new(Inspections::Faults).json().not_null())
                        .col(ColumnDef::new(Inspections::Imei).string())
                        .col(ColumnDef::new(Inspections::Inspector).string().not_null())
                        .col(
                            ColumnDef::new(Inspections::InspectedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Inspections::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Inspections {
        Table,
        Id,
        TargetItemId,
        Status,
        Grade,
        Faults,
        Imei,
        Inspector,
        InspectedAt,
    }
}

mod m20240301_000006_create_outbound_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000006_create_outbound_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OutboundOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OutboundOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrders::OrderNo)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(OutboundOrders::Client).string().not_null())
                        .col(ColumnDef::new(OutboundOrders::Carrier).string())
                        .col(
                            ColumnDef::new(OutboundOrders::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrders::ServiceType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(OutboundOrders::Remark).string())
                        .col(ColumnDef::new(OutboundOrders::Attachments).json())
                        .col(
                            ColumnDef::new(OutboundOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OutboundOrders::ShippedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OutboundItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OutboundItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OutboundItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OutboundItems::Sku).string().not_null())
                        .col(ColumnDef::new(OutboundItems::Qty).integer().not_null())
                        .col(ColumnDef::new(OutboundItems::NewFnsku).string())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_outbound_items_order_id")
                        .table(OutboundItems::Table)
                        .col(OutboundItems::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OutboundItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OutboundOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum OutboundOrders {
        Table,
        Id,
        OrderNo,
        Client,
        Carrier,
        Status,
        ServiceType,
        Remark,
        Attachments,
        CreatedAt,
        ShippedAt,
    }

    #[derive(Iden)]
    enum OutboundItems {
        Table,
        Id,
        OrderId,
        Sku,
        Qty,
        NewFnsku,
    }
}

mod m20240301_000007_create_finance_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000007_create_finance_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FinanceRules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FinanceRules::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FinanceRules::Name).string().not_null())
                        .col(ColumnDef::new(FinanceRules::RuleType).string().not_null())
                        .col(ColumnDef::new(FinanceRules::Condition).string())
                        .col(
                            ColumnDef::new(FinanceRules::Price)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(FinanceRules::Unit).string())
                        .col(ColumnDef::new(FinanceRules::ClientId).string())
                        .col(
                            ColumnDef::new(FinanceRules::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FinanceAccounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FinanceAccounts::ClientId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceAccounts::ClientName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceAccounts::Balance)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceAccounts::CreditLimit)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(FinanceAccounts::Currency).string().not_null())
                        .col(ColumnDef::new(FinanceAccounts::Status).string().not_null())
                        .col(
                            ColumnDef::new(FinanceAccounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FinanceTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FinanceTransactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceTransactions::ClientId)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceTransactions::TxType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceTransactions::Amount)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceTransactions::BalanceAfter)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceTransactions::Description)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FinanceTransactions::ReferenceId).string())
                        .col(
                            ColumnDef::new(FinanceTransactions::Operator)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinanceTransactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_finance_transactions_client")
                        .table(FinanceTransactions::Table)
                        .col(FinanceTransactions::ClientId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FinanceTransactions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FinanceAccounts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FinanceRules::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum FinanceRules {
        Table,
        Id,
        Name,
        RuleType,
        Condition,
        Price,
        Unit,
        ClientId,
        CreatedAt,
    }

    #[derive(Iden)]
    enum FinanceAccounts {
        Table,
        ClientId,
        ClientName,
        Balance,
        CreditLimit,
        Currency,
        Status,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum FinanceTransactions {
        Table,
        Id,
        ClientId,
        TxType,
        Amount,
        BalanceAfter,
        Description,
        ReferenceId,
        Operator,
        CreatedAt,
    }
}

mod m20240301_000008_create_operation_logs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000008_create_operation_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OperationLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OperationLogs::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OperationLogs::TargetTable)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OperationLogs::TargetId).string().not_null())
                        .col(ColumnDef::new(OperationLogs::Action).string().not_null())
                        .col(ColumnDef::new(OperationLogs::Operator).string().not_null())
                        .col(ColumnDef::new(OperationLogs::Details).json().not_null())
                        .col(
                            ColumnDef::new(OperationLogs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_operation_logs_target")
                        .table(OperationLogs::Table)
                        .col(OperationLogs::TargetTable)
                        .col(OperationLogs::TargetId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OperationLogs::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum OperationLogs {
        Table,
        Id,
        TargetTable,
        TargetId,
        Action,
        Operator,
        Details,
        CreatedAt,
    }
}
