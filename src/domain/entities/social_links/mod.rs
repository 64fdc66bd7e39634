pub mod social_link;

pub use social_link::*;
