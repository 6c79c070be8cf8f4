pub mod constants;
pub mod options;
pub mod schemas;

pub use constants::*;
pub use options::LayerServerOptions;
pub use schemas::{
    Announcement, Conversation, ConversationRef, Message, MessagePart, NewConversation, NewMessage,
    Notification, Sender,
};
