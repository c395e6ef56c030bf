pub mod ask;
pub mod home;
pub mod not_found;

pub use ask::Ask;
pub use home::Home;
pub use not_found::NotFound;
