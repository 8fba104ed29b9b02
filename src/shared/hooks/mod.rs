// Custom Dioxus hooks
pub mod use_chat_state;
pub mod use_debounce;
pub mod use_session_sync;
pub mod use_theme;

pub use use_chat_state::{use_chat_state, ChatState};
pub use use_debounce::use_debounced_value;
pub use use_session_sync::{
    clear_session_marker, ensure_session_marker, is_logout_event, read_session_marker,
    use_session_sync, write_session_marker,
};
pub use use_theme::{apply_theme_css, save_theme, use_theme, Theme};
