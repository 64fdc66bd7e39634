pub mod follower_repo;

pub use follower_repo::*;
