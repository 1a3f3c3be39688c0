// Wire types for the storefront REST API
//
// The backend speaks camelCase JSON and labels ids `_id`; both `id` and
// `_id` are accepted on input. Money is carried as `f64`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Pagination ───────────────────────────────────────────────────────

/// Paging metadata attached to list responses. Every field is optional on
/// the wire; accessors apply the fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub pages: Option<u32>,
}

impl Pagination {
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(0)
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn pages(&self) -> u32 {
        self.pages.unwrap_or(1)
    }
}

/// A list response: items in server order plus paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(
        alias = "products",
        alias = "orders",
        alias = "brands",
        alias = "categories",
        alias = "addresses",
        alias = "data"
    )]
    items: Vec<T>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

/// Some list endpoints answer with a bare array instead of an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Envelope(Envelope<T>),
    Bare(Vec<T>),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ListBody::deserialize(deserializer)? {
            ListBody::Envelope(env) => Self {
                items: env.items,
                pagination: env.pagination.unwrap_or_default(),
            },
            ListBody::Bare(items) => Self {
                items,
                pagination: Pagination::default(),
            },
        })
    }
}

// ── Users & auth ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Successful login/registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// New account details.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Filter, sort and paging parameters for the product list. Absent fields
/// are left off the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Body of the brand create/edit dialogs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ── Cart ─────────────────────────────────────────────────────────────

/// The product as embedded in a cart line or order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: ProductRef,
    pub quantity: u32,
    pub total_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub total_price: f64,
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductRef,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRating {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    /// Customer display name or id, present on the admin listing.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub shipping_address: Option<serde_json::Value>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub rating: Option<OrderRating>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Best-effort customer label from the embedded user reference.
    pub fn customer(&self) -> Option<String> {
        match self.user.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(map) => map
                .get("name")
                .or_else(|| map.get("email"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Id of one of the user's saved addresses.
    pub shipping_address: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

// ── Addresses ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(alias = "_id")]
    pub id: String,
    pub full_name: String,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub full_name: String,
    pub street: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_default: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_reads_products_envelope() {
        let page: Page<Product> = serde_json::from_value(json!({
            "products": [{ "_id": "p1", "name": "Mug", "price": 9.5 }],
            "pagination": { "total": 50, "page": 2, "pages": 5 }
        }))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "p1");
        assert_eq!(page.pagination.total(), 50);
        assert_eq!(page.pagination.page(), 2);
        assert_eq!(page.pagination.pages(), 5);
    }

    #[test]
    fn page_defaults_missing_pagination() {
        let page: Page<Brand> = serde_json::from_value(json!({
            "brands": [{ "_id": "b1", "name": "Acme" }]
        }))
        .unwrap();

        assert_eq!(page.pagination.total(), 0);
        assert_eq!(page.pagination.page(), 1);
        assert_eq!(page.pagination.pages(), 1);
        assert!(page.items[0].is_active);
    }

    #[test]
    fn page_accepts_bare_array() {
        let page: Page<Category> =
            serde_json::from_value(json!([{ "id": "c1", "name": "Kitchen" }])).unwrap();
        assert_eq!(page.items[0].name, "Kitchen");
    }

    #[test]
    fn order_customer_from_embedded_user() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "user": { "_id": "u1", "name": "Dana" },
            "totalPrice": 12.0,
            "status": "shipped"
        }))
        .unwrap();

        assert_eq!(order.customer().as_deref(), Some("Dana"));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.status.to_string(), "shipped");
    }

    #[test]
    fn product_query_skips_absent_fields() {
        let q = ProductQuery {
            page: Some(2),
            min_price: Some(5.0),
            ..ProductQuery::default()
        };
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({ "page": 2, "minPrice": 5.0 })
        );
    }
}
