use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::auth::{CurrentUser, Role};
use crate::db::DbService;
use crate::db::models::{DiningTable, PaymentMethod, Product};
use crate::db::repository::{DiningTableRepository, PaymentMethodRepository, ProductRepository};
use crate::orders::workflow::{CreateOrderInput, LineInput, OrderWorkflow};
use crate::orders::{OrderError, OrderStatus, OrderView};

mod test_lifecycle;
mod test_numbering;

const TZ: Tz = chrono_tz::Europe::Madrid;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Fixed business-time instants; the workflow never reads the clock itself
fn at(hour: u32, min: u32) -> DateTime<Tz> {
    TZ.with_ymd_and_hms(2025, 8, 7, hour, min, 0).unwrap()
}

fn next_day(hour: u32) -> DateTime<Tz> {
    TZ.with_ymd_and_hms(2025, 8, 8, hour, 0, 0).unwrap()
}

struct TestEnv {
    workflow: Arc<OrderWorkflow>,
    products: ProductRepository,
    table_id: String,
    /// product "Paella", 10.00
    paella: String,
    /// product "Gazpacho", 5.00
    gazpacho: String,
    /// product "Croquetas", 7.00 — seeded unavailable
    croquetas: String,
    /// active payment method "Efectivo"
    cash: String,
    /// inactive payment method "Cheque"
    inactive_method: String,
    /// creation-minute counter so created_at never ties between orders
    seq: AtomicU32,
}

async fn setup() -> TestEnv {
    let service = DbService::in_memory().await.unwrap();
    let db = service.db;

    let products = ProductRepository::new(db.clone());
    let tables = DiningTableRepository::new(db.clone());
    let methods = PaymentMethodRepository::new(db.clone());

    let table_id = tables
        .create(DiningTable {
            id: None,
            number: "5".to_string(),
            seats: 4,
            is_active: true,
        })
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string();

    let paella = create_product(&products, "Paella", "10.00", true).await;
    let gazpacho = create_product(&products, "Gazpacho", "5.00", true).await;
    let croquetas = create_product(&products, "Croquetas", "7.00", false).await;

    let cash = create_method(&methods, "Efectivo", true).await;
    let inactive_method = create_method(&methods, "Cheque", false).await;

    TestEnv {
        workflow: Arc::new(OrderWorkflow::new(db)),
        products,
        table_id,
        paella,
        gazpacho,
        croquetas,
        cash,
        inactive_method,
        seq: AtomicU32::new(0),
    }
}

async fn create_product(
    products: &ProductRepository,
    name: &str,
    price: &str,
    available: bool,
) -> String {
    products
        .create(Product {
            id: None,
            name: name.to_string(),
            price: dec(price),
            is_available: available,
            is_active: true,
        })
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string()
}

async fn create_method(
    methods: &PaymentMethodRepository,
    name: &str,
    active: bool,
) -> String {
    methods
        .create(PaymentMethod {
            id: None,
            name: name.to_string(),
            description: None,
            is_active: active,
        })
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string()
}

fn waiter() -> CurrentUser {
    CurrentUser {
        id: "user:waiter1".to_string(),
        name: "María".to_string(),
        role: Role::Waiter,
    }
}

fn customer() -> CurrentUser {
    CurrentUser {
        id: "user:table5".to_string(),
        name: "Mesa 5".to_string(),
        role: Role::Customer,
    }
}

fn cashier() -> CurrentUser {
    CurrentUser {
        id: "user:cashier1".to_string(),
        name: "Luis".to_string(),
        role: Role::Cashier,
    }
}

fn line(product_id: &str, quantity: i32) -> LineInput {
    LineInput {
        product_id: product_id.to_string(),
        quantity,
        note: None,
    }
}

impl TestEnv {
    /// Create a pending order for the given (product, quantity) pairs
    async fn order_with(&self, actor: &CurrentUser, lines: Vec<LineInput>) -> OrderView {
        let minute = self.seq.fetch_add(1, Ordering::Relaxed) % 60;
        self.workflow
            .create_order(
                actor,
                CreateOrderInput {
                    table_id: self.table_id.clone(),
                    note: None,
                    lines,
                },
                at(12, minute),
            )
            .await
            .unwrap()
    }

    /// Mark every line of the order completed, returning the final status
    async fn complete_all_lines(&self, order: &OrderView) -> OrderStatus {
        let mut status = order.status;
        for l in &order.lines {
            status = self
                .workflow
                .set_line_completion(&l.id, true, at(13, 30))
                .await
                .unwrap();
        }
        status
    }
}
