//! Database Models
//!
//! All models use SurrealDB RecordId for ids, serialized as "table:id"
//! strings via [`serde_helpers`].

pub mod account;
pub mod product;
pub mod repair;
pub mod request;
pub mod serde_helpers;
pub mod store;

pub use account::{Account, AccountCreate, AccountId, Role};
pub use product::{LOW_STOCK_THRESHOLD, Product, ProductId, ProductPayload, resize_serials};
pub use repair::{Repair, RepairId, RepairPayload, RepairStatus};
pub use request::{
    RequestCreate, RequestId, RequestStatus, RequestStatusUpdate, StockRequest,
};
pub use store::{Store, StoreId, StorePayload};
