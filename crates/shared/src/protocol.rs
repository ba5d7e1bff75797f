use serde::{Deserialize, Serialize};

use crate::{domain::ProductId, token::Command};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, command: &Command) -> Self {
        Self {
            label: label.into(),
            token: command.encode(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub path: String,
}

/// Transport-agnostic screen content. When `media` is present, `text` is
/// its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationPayload {
    pub text: String,
    pub rows: Vec<Vec<Button>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
}

/// Short-lived message shown on top of the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    FirstItem,
    LastItem,
    InvalidSelection,
    Unavailable,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Self::FirstItem => "This is the first item.",
            Self::LastItem => "This is the last item.",
            Self::InvalidSelection => "Invalid selection.",
            Self::Unavailable => "The catalog is temporarily unavailable, please try again.",
        }
    }
}

/// Requests handled outside the navigation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Intent {
    CartAdd { product_id: ProductId },
    Checkout,
}

impl Intent {
    pub fn acknowledgement(self) -> &'static str {
        match self {
            Self::CartAdd { .. } => "Cart request received.",
            Self::Checkout => "Order request received.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Reply {
    Show(PresentationPayload),
    Notice(Notice),
    Intent(Intent),
}

impl Reply {
    /// Text for the pop-up answer; screens carry their own text.
    pub fn toast_text(&self) -> Option<&'static str> {
        match self {
            Self::Show(_) => None,
            Self::Notice(notice) => Some(notice.text()),
            Self::Intent(intent) => Some(intent.acknowledgement()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTarget {
    pub chat_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub raw_token: String,
    pub reply_target: ReplyTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Send,
    Edit,
    /// Pop-up answer; the visible message is left alone.
    Toast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub reply_target: ReplyTarget,
    pub delivery: Delivery,
    pub reply: Reply,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast: Option<String>,
}
