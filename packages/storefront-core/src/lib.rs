pub mod role;
pub mod slug_gen;

pub use role::{Role, authorize, is_admin};
