pub mod client;
pub mod error;
pub mod model;

pub use model::{Gender, NewUser, User, UserPatch, UsersFilter, UsersPage, UsersQuery};
