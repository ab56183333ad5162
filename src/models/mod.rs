pub mod todo;
pub mod user;

pub use todo::{Todo, TodoInput, TodoPath};
pub use user::{NewUser, PublicUser, User};
