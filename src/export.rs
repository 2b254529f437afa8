//! Order export writer.
//!
//! Flattens a JSON snapshot of the user and order collections into the CSV
//! layout the report reads: one row per order, joined to its user, carrying
//! the first item's food name and quantity.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::report::types::format_number;

/// Column order of the export file.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "_id",
    "user_name",
    "email",
    "food_name",
    "totalPrice",
    "status",
    "createdAt",
    "updatedAt",
    "paymentId",
    "quantity",
];

const UNKNOWN: &str = "Unknown";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub users: Vec<UserDoc>,
    #[serde(default)]
    pub orders: Vec<OrderDoc>,
}

#[derive(Debug, Deserialize)]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDoc {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderItem {
    pub food: FoodRef,
    #[serde(default)]
    pub quantity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct FoodRef {
    pub name: String,
}

/// One flattened export row; every field is already rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub food_name: String,
    pub total_price: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub payment_id: String,
    pub quantity: String,
}

impl ExportRow {
    fn as_record(&self) -> [&str; 10] {
        [
            &self.id,
            &self.user_name,
            &self.email,
            &self.food_name,
            &self.total_price,
            &self.status,
            &self.created_at,
            &self.updated_at,
            &self.payment_id,
            &self.quantity,
        ]
    }
}

/// Joins each order to its user and renders the export rows, in order.
pub fn export_rows(snapshot: &StoreSnapshot) -> Vec<ExportRow> {
    let users: HashMap<&str, &UserDoc> = snapshot
        .users
        .iter()
        .map(|u| (u.id.as_str(), u))
        .collect();

    snapshot
        .orders
        .iter()
        .map(|order| {
            let user = order.user.as_deref().and_then(|id| users.get(id));
            let (user_name, email) = match user {
                Some(u) => (
                    u.name.clone().unwrap_or_default(),
                    u.email.clone().unwrap_or_default(),
                ),
                None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
            };

            let first_item = order.items.first();
            let food_name = first_item
                .map(|item| item.food.name.clone())
                .unwrap_or_else(|| UNKNOWN.to_string());
            let quantity = first_item
                .and_then(|item| item.quantity)
                .map(format_number)
                .unwrap_or_default();

            ExportRow {
                id: order.id.clone().unwrap_or_default(),
                user_name,
                email,
                food_name,
                total_price: order.total_price.map(format_number).unwrap_or_default(),
                status: order.status.clone().unwrap_or_default(),
                created_at: format_timestamp(order.created_at),
                updated_at: format_timestamp(order.updated_at),
                payment_id: order.payment_id.clone().unwrap_or_default(),
                quantity,
            }
        })
        .collect()
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Reads a store snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

/// Rewrites the export at `path` from `snapshot` and returns the row count.
///
/// The header is always written, even when there are no orders.
pub fn write_export(path: &Path, snapshot: &StoreSnapshot) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let rows = export_rows(snapshot);
    debug!(path = %path.display(), rows = rows.len(), "Writing order export");

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(EXPORT_COLUMNS)?;
    for row in &rows {
        writer.write_record(row.as_record())?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Order export written");
    Ok(rows.len())
}
