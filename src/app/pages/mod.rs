pub mod routes;

// Public snapshot view renders on the server so share links work
// without hydration
pub mod shared_chat;

// Interactive panels use WASM-only features (streaming fetch, localStorage);
// routes.rs carries their SSR stubs
#[cfg(target_arch = "wasm32")]
pub mod chat;
#[cfg(target_arch = "wasm32")]
pub mod drugs;
#[cfg(target_arch = "wasm32")]
pub mod guidelines;
#[cfg(target_arch = "wasm32")]
pub mod profile;

#[cfg(target_arch = "wasm32")]
pub use chat::ChatPanel;
#[cfg(target_arch = "wasm32")]
pub use drugs::DrugPanel;
#[cfg(target_arch = "wasm32")]
pub use guidelines::GuidelinePanel;
#[cfg(target_arch = "wasm32")]
pub use profile::ProfilePanel;
