//! Order Lifecycle Module
//!
//! This module owns the order workflow from creation through payment:
//!
//! - **number**: daily-scoped order number generation
//! - **status**: the order state machine (Pending → InPreparation → Ready → Settled)
//! - **money**: fixed-point monetary arithmetic and bounds
//! - **workflow**: the single mutation path over orders, with per-order locking
//! - **view**: response shapes with resolved display names
//!
//! # Command Flow
//!
//! ```text
//! handler (validated input, injected clock)
//!     └─ OrderWorkflow
//!          ├─ acquire per-order lock (or the allocation lock for creation)
//!          ├─ load current state
//!          ├─ decide transition (status table)
//!          ├─ persist atomically (UNIQUE indexes as the backstop)
//!          └─ return view
//! ```
//!
//! Every read-decide-write sequence happens inside one lock scope; no
//! handler touches order state around the workflow.

pub mod error;
pub mod money;
pub mod number;
pub mod status;
pub mod view;
pub mod workflow;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::{OrderError, OrderResult};
pub use status::OrderStatus;
pub use view::{DailyOrderReport, LineView, OrderView, PaymentView};
pub use workflow::{CreateOrderInput, LineInput, OrderWorkflow};
