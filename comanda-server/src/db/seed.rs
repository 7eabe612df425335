//! Initial Data
//!
//! Inserts the baseline payment methods on first boot and, in development,
//! a small demo catalog so the order flow can be exercised immediately.
//! Catalog maintenance beyond this lives outside the order core.

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{DiningTable, PaymentMethod, Product};
use crate::db::repository::{DiningTableRepository, PaymentMethodRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

/// Seed baseline data. Idempotent: only fills empty tables.
pub async fn seed_defaults(db: &Surreal<Db>, demo_catalog: bool) -> AppResult<()> {
    seed_payment_methods(db).await?;
    if demo_catalog {
        seed_demo_catalog(db).await?;
    }
    Ok(())
}

async fn seed_payment_methods(db: &Surreal<Db>) -> AppResult<()> {
    let repo = PaymentMethodRepository::new(db.clone());
    if repo.count().await.map_err(AppError::from)? > 0 {
        return Ok(());
    }

    let defaults = [
        ("Efectivo", "Pago en efectivo"),
        ("Tarjeta", "Tarjeta de crédito o débito"),
        ("Bizum", "Pago móvil"),
    ];

    for (name, description) in defaults {
        repo.create(PaymentMethod {
            id: None,
            name: name.to_string(),
            description: Some(description.to_string()),
            is_active: true,
        })
        .await
        .map_err(AppError::from)?;
    }

    tracing::info!("Seeded default payment methods");
    Ok(())
}

async fn seed_demo_catalog(db: &Surreal<Db>) -> AppResult<()> {
    let products = ProductRepository::new(db.clone());
    let tables = DiningTableRepository::new(db.clone());

    if products.count().await.map_err(AppError::from)? == 0 {
        let demo = [
            ("Paella Valenciana", "14.50"),
            ("Tortilla Española", "8.00"),
            ("Gazpacho", "6.50"),
            ("Croquetas de Jamón", "7.00"),
            ("Agua Mineral", "2.00"),
        ];
        for (name, price) in demo {
            products
                .create(Product {
                    id: None,
                    name: name.to_string(),
                    price: price.parse::<Decimal>().unwrap_or_default(),
                    is_available: true,
                    is_active: true,
                })
                .await
                .map_err(AppError::from)?;
        }
        tracing::info!("Seeded demo products");
    }

    if tables.count().await.map_err(AppError::from)? == 0 {
        for n in 1..=8 {
            tables
                .create(DiningTable {
                    id: None,
                    number: n.to_string(),
                    seats: 4,
                    is_active: true,
                })
                .await
                .map_err(AppError::from)?;
        }
        tracing::info!("Seeded demo tables");
    }

    Ok(())
}
