pub mod image_fetcher;
pub mod processor;
pub mod registry;
pub mod reporter;
pub mod store_directory;
