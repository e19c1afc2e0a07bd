//! Ordered narration buffer.
//!
//! Everything an incantation narrates is collected here and flushed as one
//! final step, so two messages produced by the same resolution can never be
//! reordered by the transport.
//!
//! A message is either a broadcast (`Send`) or a directed reply (`Reply`).
//! Messages can be built up piecewise with [`OutputBuffer::start_send`],
//! [`OutputBuffer::append`] and [`OutputBuffer::end`].

use serde::{Deserialize, Serialize};

/// One outgoing message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    /// Broadcast to the channel.
    Send(String),
    /// Directed at the player who issued the command.
    Reply(String),
}

impl Message {
    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Send(text) | Self::Reply(text) => text,
        }
    }

    /// Whether this is a directed reply.
    #[must_use]
    pub fn is_reply(&self) -> bool {
        matches!(self, Self::Reply(_))
    }
}

/// Receiver of flushed narration.
pub trait NarrationSink {
    /// Deliver a broadcast.
    fn send(&mut self, text: &str);
    /// Deliver a directed reply.
    fn reply(&mut self, text: &str);
}

impl NarrationSink for Vec<Message> {
    fn send(&mut self, text: &str) {
        self.push(Message::Send(text.to_string()));
    }

    fn reply(&mut self, text: &str) {
        self.push(Message::Reply(text.to_string()));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Send,
    Reply,
}

/// Collects narration in order.
#[derive(Clone, Debug, Default)]
pub struct OutputBuffer {
    messages: Vec<Message>,
    running: Option<(Kind, String)>,
}

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a broadcast. Ends any running message first.
    pub fn send(&mut self, text: impl Into<String>) {
        self.end();
        self.messages.push(Message::Send(text.into()));
    }

    /// Queue a directed reply. Ends any running message first.
    pub fn reply(&mut self, text: impl Into<String>) {
        self.end();
        self.messages.push(Message::Reply(text.into()));
    }

    /// Start building a broadcast.
    pub fn start_send(&mut self) {
        self.start(Kind::Send);
    }

    /// Start building a reply.
    pub fn start_reply(&mut self) {
        self.start(Kind::Reply);
    }

    /// Append to the running message, starting a broadcast if none is running.
    pub fn append(&mut self, text: impl AsRef<str>) {
        let (_, content) = self.running.get_or_insert_with(|| (Kind::Send, String::new()));
        content.push_str(text.as_ref());
    }

    /// Finish the running message, if any. Empty messages are dropped.
    pub fn end(&mut self) {
        if let Some((kind, content)) = self.running.take() {
            let content = content.trim_end().to_string();
            if content.is_empty() {
                return;
            }
            self.messages.push(match kind {
                Kind::Send => Message::Send(content),
                Kind::Reply => Message::Reply(content),
            });
        }
    }

    /// Finished messages so far (the running one is not included).
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a running message is open.
    #[must_use]
    pub fn is_building(&self) -> bool {
        self.running.is_some()
    }

    /// End the running message and drain everything.
    pub fn take(&mut self) -> Vec<Message> {
        self.end();
        std::mem::take(&mut self.messages)
    }

    /// Move everything from `other` to the end of this buffer.
    pub fn absorb(&mut self, other: &mut OutputBuffer) {
        self.end();
        self.messages.extend(other.take());
    }

    /// Deliver everything to `sink` in order.
    pub fn flush(&mut self, sink: &mut impl NarrationSink) {
        for message in self.take() {
            match message {
                Message::Send(text) => sink.send(&text),
                Message::Reply(text) => sink.reply(&text),
            }
        }
    }

    fn start(&mut self, kind: Kind) {
        self.end();
        self.running = Some((kind, String::new()));
    }
}
