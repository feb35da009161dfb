pub mod ids;
pub mod invite;
pub mod store;

pub use ids::*;
pub use invite::InviteService;
pub use store::*;
