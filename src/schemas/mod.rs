pub mod invite;

pub use invite::*;
