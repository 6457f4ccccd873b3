#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use tokio::sync::mpsc;
use uuid::Uuid;

use wms_api::{
    auth::CurrentUser,
    config::AppConfig,
    db::{self, DbConfig},
    entities::{client, finance_rule, product},
    events::{Event, EventSender},
    AppState,
};

/// Test harness backed by an in-memory SQLite database.
///
/// A single pooled connection keeps every query on the same in-memory
/// database. The event receiver is held open so emitted events are drained
/// by the tests that care and ignored by the rest.
pub struct TestApp {
    pub state: AppState,
    pub events_rx: mpsc::Receiver<Event>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_config = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let db = Arc::new(
            db::establish_connection_with_config(&db_config)
                .await
                .expect("in-memory database"),
        );
        db::run_migrations(&db).await.expect("migrations");

        let (tx, rx) = mpsc::channel(256);
        let state = AppState::new(db, AppConfig::default(), EventSender::new(tx));
        Self {
            state,
            events_rx: rx,
        }
    }

    pub fn db(&self) -> &sea_orm::DatabaseConnection {
        &self.state.db
    }

    pub async fn seed_client(&self, name: &str, default_location: Option<&str>) -> client::Model {
        client::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            default_location: Set(default_location.map(str::to_string)),
            contact: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(self.db())
        .await
        .expect("seed client")
    }

    pub async fn seed_product(&self, client: &str, sku: &str) -> product::Model {
        product::ActiveModel {
            id: Set(Uuid::new_v4()),
            client: Set(client.to_string()),
            sku: Set(sku.to_string()),
            name: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(self.db())
        .await
        .expect("seed product")
    }

    pub async fn seed_rule(
        &self,
        name: &str,
        rule_type: &str,
        condition: Option<&str>,
        price: Decimal,
        client_id: Option<&str>,
    ) -> finance_rule::Model {
        finance_rule::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            rule_type: Set(rule_type.to_string()),
            condition: Set(condition.map(str::to_string)),
            price: Set(price),
            unit: Set(None),
            client_id: Set(client_id.map(str::to_string)),
            created_at: Set(Utc::now()),
        }
        .insert(self.db())
        .await
        .expect("seed rule")
    }
}

pub fn operator() -> CurrentUser {
    CurrentUser::new("tester")
}
