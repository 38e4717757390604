use crate::timestamp::Timestamp;

/// Severity of a log line. `Unknown` covers anything without a recognized level token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Unknown,
    Info,
    Debug,
    Error,
    Warn,
}

/// The levels that can actually head a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Debug,
    Error,
    Warn,
}

impl Level {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "INFO" => Some(Level::Info),
            "DEBUG" => Some(Level::Debug),
            "ERROR" => Some(Level::Error),
            "WARN" => Some(Level::Warn),
            _ => None,
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => Severity::Info,
            Level::Debug => Severity::Debug,
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageSubject {
    Unknown,
    Counter,
    Scheduler,
    Flipper,
    RabbitMQ,
}

impl MessageSubject {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CT" => Some(MessageSubject::Counter),
            "SC" => Some(MessageSubject::Scheduler),
            "FL" => Some(MessageSubject::Flipper),
            "MQ" => Some(MessageSubject::RabbitMQ),
            "??" => Some(MessageSubject::Unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

impl MessageDirection {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "IN" => Some(MessageDirection::Incoming),
            "OUT" => Some(MessageDirection::Outgoing),
            _ => None,
        }
    }
}

/// Payload of a log line after the level, timestamp and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Opaque free text.
    Simple(String),
    /// `<SUBJECT> <DIRECTION> <content...>`
    Structured {
        subject: MessageSubject,
        direction: MessageDirection,
        content: String,
    },
}

impl Message {
    pub fn is_simple(&self) -> bool {
        matches!(self, Message::Simple(_))
    }

    pub fn content(&self) -> &str {
        match self {
            Message::Simple(content) | Message::Structured { content, .. } => content,
        }
    }

    pub fn subject(&self) -> Option<MessageSubject> {
        match self {
            Message::Simple(_) => None,
            Message::Structured { subject, .. } => Some(*subject),
        }
    }
}

/// Fields that only exist on lines with a recognized level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHeader {
    pub level: Level,
    pub timestamp: Timestamp,
    pub location: String,
}

/// One physical line of the watched log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Raw text exactly as read
    pub original: String,
    /// Zero-based line number
    pub index: usize,
    pub header: Option<LineHeader>,
    pub message: Message,
}

impl LogLine {
    pub fn severity(&self) -> Severity {
        self.header
            .as_ref()
            .map_or(Severity::Unknown, |header| header.level.into())
    }

    pub fn timestamp(&self) -> Option<&Timestamp> {
        self.header.as_ref().map(|header| &header.timestamp)
    }

    pub fn location(&self) -> Option<&str> {
        self.header.as_ref().map(|header| header.location.as_str())
    }

    /// `INFO` line carrying a structured `CT` message.
    pub fn is_counter(&self) -> bool {
        self.severity() == Severity::Info
            && !self.message.is_simple()
            && self.message.subject() == Some(MessageSubject::Counter)
    }
}

