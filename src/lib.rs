//! Customer registry persisted as a single JSON document.
//!
//! Each customer has an id, a name, a coupon count and an optional allergy
//! list. The whole file is loaded at startup, reads come from memory, and
//! every modification rewrites the file.
//!
//! ```rust,no_run
//! use customer_store::{Customer, CustomerStore};
//!
//! let store = CustomerStore::open("customers.json");
//! store.modify_customer_info(Customer::new(1, "Kim", 3).with_allergens(["peanut"]));
//! for c in store.read_customer_info() {
//!     println!("{} has {} coupons", c.name, c.coupon);
//! }
//! ```
//!
//! Failures never reach the caller of the two core operations; they go to a
//! [`DiagnosticSink`] (by default, `tracing` events).
//!
//! **Single-process only.** If multiple processes open the same file they will
//! clobber each other.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod customer;
pub mod diagnostics;
pub mod error;
pub mod persist;
pub mod projection;
pub mod serializer;
pub mod store;

pub use customer::{AllergyInfo, Customer};
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{Error, Result};
pub use store::{CustomerStore, CustomerStoreBuilder, DEFAULT_DATA_PATH};
