pub mod followers;
pub mod social_links;
pub mod users;

pub use followers::*;
pub use social_links::*;
pub use users::*;
