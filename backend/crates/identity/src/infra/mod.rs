//! Infrastructure Layer
//!
//! Attribute-table implementations and the repository adapter over them.

pub mod codec;
pub mod dynamo;
pub mod memory;
pub mod repository;
pub mod retry;
pub mod table;

pub use dynamo::DynamoTable;
pub use memory::InMemoryTable;
pub use repository::TableIdentityRepository;
pub use table::{AttributeTable, ScanPage};
