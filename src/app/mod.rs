pub mod components;
pub mod pages;

// Re-export the root application component
pub use pages::routes::App;
