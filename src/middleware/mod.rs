pub mod validate_tenant;

pub use validate_tenant::{validate_tenant_middleware, ResolvedTenant, X_TENANT_ID};
