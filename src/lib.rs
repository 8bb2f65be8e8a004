//! # Hotel Console
//!
//! Administrative console for a hotel-management REST backend: rooms,
//! guests, reservations, payments and reports behind token login.
//!
//! ## Architecture
//!
//! - **domain**: entities, status enums, forms and repository traits
//! - **application**: availability and price derivation, payment search,
//!   the login session and the workflow services
//! - **infrastructure**: REST gateway, in-memory backend, token stores
//! - **shared**: view scope for cancelling screen loads
//!
//! ```ignore
//! let backend = Arc::new(RestGateway::new(&config.api.base_url, config.api.timeout())?);
//! let checkout = CheckoutService::new(backend);
//! let form = checkout.open(session.credential()?, Some(reservation_id)).await?;
//! println!("{:?}", form.amount());
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig};
pub use telemetry::init_tracing;
