//! User aggregate
//!
//! Identity record, the closed role set and the permission policy over it.

pub mod model;
pub mod policy;

mod dto_create;

pub use model::{User, UserRole};
pub use policy::{implied_roles, RoleRequirement};

pub use dto_create::CreateUserDto;
