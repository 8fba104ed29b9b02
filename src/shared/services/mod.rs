// Shared services
#[cfg(target_arch = "wasm32")]
pub mod api_service;

#[cfg(target_arch = "wasm32")]
pub use api_service::ApiService;
