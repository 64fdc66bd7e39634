pub mod follower;

pub use follower::*;
