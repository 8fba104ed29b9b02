// Domain models (business entities)
// Pure Rust, no framework dependencies

pub mod answer;
pub mod citation;
pub mod lookup;
pub mod message;
pub mod profile;
pub mod snapshot;
pub mod stream;
pub mod suggestion;

pub use answer::StructuredAnswer;
pub use citation::{Citation, SourceKind};
pub use lookup::{
    DrugHit, DrugSearchResponse, FollowupResponse, GuidelineHit, GuidelineSearchResponse,
    GuidelineSummaryResponse,
};
pub use message::{ChatMessage, Conversation, ConversationSummary, QuestionKind};
pub use profile::UserProfile;
pub use snapshot::{PublicChatSnapshot, SnapshotThread};
pub use stream::{AskRequest, HistoryEntry, StreamEvent};
pub use suggestion::{SuggestionRequest, SuggestionResponse};
