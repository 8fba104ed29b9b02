pub mod citation_list;
pub mod common;
pub mod suggestion_chips;
pub mod theme_toggle;

// Chat input and message list - available on all platforms for SSR + hydration
pub mod chat_input;
pub mod chat_messages;

pub use chat_input::ChatInput;
pub use chat_messages::{render_markdown, ChatMessages};
pub use citation_list::CitationList;
pub use common::{ConversationsLoading, ErrorMessage, LoadingText};
pub use suggestion_chips::SuggestionChips;
pub use theme_toggle::ThemeToggle;
