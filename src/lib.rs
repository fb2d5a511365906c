//! Stowage Engine
//!
//! An in-memory cargo stowage engine: a fixed inventory of storage containers
//! and cargo items, with allocation, lifecycle and simulated-time expiry.
//!
//! ## Components
//!
//! - [`store`] - Canonical container/item records with insertion-order iteration
//! - [`allocation`] - Zone-matched batch allocation and explicit placement
//! - [`lifecycle`] - Retrieval (unassign) and disposal (remove)
//! - [`clock`] - Simulated clock and perishable-item expiry sweep
//! - [`search`] - Linear-scan query over both stores
//! - [`transfer`] - Bulk import/export
//! - [`audit`] - Append-only, queryable audit trail
//! - [`api`] - Wire request/response types for the HTTP front end
//!
//! All state lives in a single [`Stowage`] context object; wrap it in
//! [`SharedStowage`] to serve concurrent callers (writers exclusive, readers
//! shared).
//!
//! ## Example
//!
//! ```rust
//! use stowage_rs::{Container, Item, Stowage};
//!
//! let mut engine = Stowage::new();
//!
//! let result = engine.allocate_batch(
//!     vec![Container::new("C1", "A")],
//!     vec![Item::new("I1").with_preferred_zone("A").with_dimensions(2.0, 2.0, 1.0)],
//! );
//! assert_eq!(result.placements[0].container_id, "C1");
//!
//! let retrieval = engine.retrieve("I1").unwrap();
//! assert_eq!(retrieval.container_id, "C1");
//! ```

pub mod allocation;
pub mod api;
pub mod audit;
pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod search;
pub mod store;
pub mod stowage;
pub mod transfer;

// Re-export commonly used types
pub use allocation::{BatchAllocation, UnplacedItem};
pub use audit::{AuditAction, AuditEntry, AuditLog};
pub use clock::{AffectedItem, SimClock, TimeAdvance};
pub use error::{ErrorKind, Result, StowageError};
pub use lifecycle::{Disposal, Retrieval};
pub use model::{Container, Coordinates, Item, Placement, Position};
pub use search::{SearchResults, SearchScope};
pub use store::{EntityStore, RecordSet};
pub use stowage::{SharedStowage, Stowage};
pub use transfer::{ExportScope, ExportSnapshot, ImportSummary};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
