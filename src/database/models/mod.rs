pub mod kindergarten;
pub mod organization;
pub mod user;

pub use kindergarten::Kindergarten;
pub use organization::{Organization, OrganizationListing, OrganizationPatch};
pub use user::{NewUser, User, UserPatch};
