//! Reusable UI components

pub mod chat_input;
pub mod chat_message;
pub mod footer;
pub mod header;
pub mod loading;
pub mod notice;

pub use chat_input::ChatInput;
pub use chat_message::{ChatMessage, FailedMessage, PendingMessage};
pub use footer::Footer;
pub use header::Header;
pub use loading::{Spinner, TypingIndicator};
pub use notice::{Notice, NoticeKind};
