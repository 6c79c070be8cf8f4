use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the fixed Layer Platform API routes.
///
/// Identifiers are interpolated as given, except for `%`, `#`, `?` and `\`,
/// which are percent-encoded so that URL parsing cannot turn them into a
/// query, a fragment or a path separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    ConversationsAsUser { user_id: &'a str },
    ConversationMessagesAsUser { user_id: &'a str, conversation_id: &'a str },
    PostMessageAsUser { user_id: &'a str, conversation_id: &'a str },
    PostConversationAsUser { user_id: &'a str },
    Conversation { conversation_id: &'a str },
    ConversationMessages { conversation_id: &'a str },
    PostConversation,
    PostMessage { conversation_id: &'a str },
    PostAnnouncement,
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ConversationsAsUser { .. }
            | Endpoint::ConversationMessagesAsUser { .. }
            | Endpoint::Conversation { .. }
            | Endpoint::ConversationMessages { .. } => Method::Get,
            Endpoint::PostMessageAsUser { .. }
            | Endpoint::PostConversationAsUser { .. }
            | Endpoint::PostConversation
            | Endpoint::PostMessage { .. }
            | Endpoint::PostAnnouncement => Method::Post,
        }
    }

    fn identifiers(&self) -> Vec<&str> {
        match *self {
            Endpoint::ConversationsAsUser { user_id }
            | Endpoint::PostConversationAsUser { user_id } => vec![user_id],
            Endpoint::ConversationMessagesAsUser {
                user_id,
                conversation_id,
            }
            | Endpoint::PostMessageAsUser {
                user_id,
                conversation_id,
            } => vec![user_id, conversation_id],
            Endpoint::Conversation { conversation_id }
            | Endpoint::ConversationMessages { conversation_id }
            | Endpoint::PostMessage { conversation_id } => vec![conversation_id],
            Endpoint::PostConversation | Endpoint::PostAnnouncement => vec![],
        }
    }

    /// Rejects identifiers a URL parser would rewrite: `.` and `..` segments,
    /// which get collapsed, and control characters, which get stripped.
    pub fn check(&self, app_id: &str) -> Result<()> {
        for id in std::iter::once(app_id).chain(self.identifiers()) {
            let dot_segment = id
                .split('/')
                .any(|segment| segment == "." || segment == "..");
            if dot_segment || id.chars().any(char::is_control) {
                return Err(Error::InvalidIdentifier(id.to_string()));
            }
        }
        Ok(())
    }

    /// Path relative to the API host, query string included.
    pub fn path(&self, app_id: &str) -> String {
        let app_id = Escaped(app_id);
        match *self {
            Endpoint::ConversationsAsUser { user_id } => format!(
                "/apps/{}/user/{}/conversations?sort_by=last_message",
                app_id,
                Escaped(user_id)
            ),
            Endpoint::ConversationMessagesAsUser {
                user_id,
                conversation_id,
            }
            | Endpoint::PostMessageAsUser {
                user_id,
                conversation_id,
            } => format!(
                "/apps/{}/user/{}/conversations/{}/messages",
                app_id,
                Escaped(user_id),
                Escaped(conversation_id)
            ),
            Endpoint::PostConversationAsUser { user_id } => {
                format!("/apps/{}/user/{}/conversations", app_id, Escaped(user_id))
            }
            Endpoint::Conversation { conversation_id } => format!(
                "/apps/{}/conversations/{}",
                app_id,
                Escaped(conversation_id)
            ),
            Endpoint::ConversationMessages { conversation_id }
            | Endpoint::PostMessage { conversation_id } => format!(
                "/apps/{}/conversations/{}/messages",
                app_id,
                Escaped(conversation_id)
            ),
            Endpoint::PostConversation => format!("/apps/{}/conversations", app_id),
            Endpoint::PostAnnouncement => format!("/apps/{}/announcements", app_id),
        }
    }
}

/// Percent-encodes the characters URL parsing would otherwise interpret.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '%' => f.write_str("%25")?,
                '#' => f.write_str("%23")?,
                '?' => f.write_str("%3F")?,
                '\\' => f.write_str("%5C")?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}
