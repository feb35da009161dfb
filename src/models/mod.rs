pub mod invite;
pub mod relationship;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::invite::{self, Entity as Invite};
    pub use super::relationship::{self, Entity as Relationship};
}
