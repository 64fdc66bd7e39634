pub mod social_link_repo;

pub use social_link_repo::*;
