pub mod nav_key;
pub mod role;

pub use nav_key::NavKey;
pub use role::Role;
