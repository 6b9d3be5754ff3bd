//! Domain entities - the objects the gateway relays and stores.

mod post;
mod user;

pub use post::{CreatePost, PageRequest, Post, PostKey, PostsPage, UpdatePost};
pub use user::{NewUser, User, UserPublic};
