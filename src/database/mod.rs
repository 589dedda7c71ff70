pub mod manager;
pub mod models;
pub mod registry;
pub mod tenant_store;

pub use manager::{connect_central, DatabaseError, SqliteTenantConnector, TenantConnector};
pub use registry::{Registry, SqliteRegistry};
pub use tenant_store::TenantStore;
