pub mod loader;
pub mod nav;

pub use loader::Loader;
pub use nav::Nav;
