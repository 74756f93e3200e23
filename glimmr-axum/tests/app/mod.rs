mod application;
mod catalog;

pub use application::TestApp;
pub use catalog::TestCatalog;
