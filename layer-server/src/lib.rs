#![allow(clippy::module_inception)]
mod client;
pub mod error;

pub use client::{Endpoint, HttpClient, LayerResponse, LayerServerClient, Method};

#[cfg(feature = "reqwest-client")]
pub use client::ReqwestClient;
#[cfg(feature = "ureq-client")]
pub use client::UreqClient;

pub use error::{Error, Result};

// Re-export core types for convenience
pub use layer_core::{
    schemas, Announcement, Conversation, LayerServerOptions, Message, MessagePart,
    NewConversation, NewMessage, Notification, Sender, LAYER_API_URL, PAGE_SIZE,
};
