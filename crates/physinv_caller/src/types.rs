use std::fmt;

use physinv_core::{DecodeError, Header, Item, Resource, ToItem};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportKind {
    InvalidUrl,
    InvalidHeader,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::InvalidUrl => write!(f, "invalid url"),
            TransportKind::InvalidHeader => write!(f, "invalid header value"),
            TransportKind::HttpStatus(code) => write!(f, "http status {code}"),
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            TransportKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            TransportKind::Network => write!(f, "network error"),
        }
    }
}

/// Terminal failure of one fetch branch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallerError {
    #[error("API request error: {0}")]
    Transport(#[from] TransportError),
    #[error("convert error: {0}")]
    Decode(#[from] DecodeError),
    #[error("no header found for fiscal year {fiscal_year}, document {document_id}")]
    EmptyResult {
        fiscal_year: String,
        document_id: String,
    },
    #[error("header {document_id} has no item navigation link")]
    MissingNavigationLink { document_id: String },
    #[error("branch aborted: {message}")]
    Aborted { message: String },
}

/// Everything a branch reports to the [`crate::EventSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum CallerEvent {
    Headers(Vec<Header>),
    Items(Vec<Item>),
    ToItems(Vec<ToItem>),
    Failed {
        resource: Resource,
        error: CallerError,
    },
}

/// Terminal state of one accepter entry.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchOutcome {
    Completed { resource: Resource },
    Failed {
        resource: Resource,
        error: CallerError,
    },
    Ignored { value: String },
}

impl BranchOutcome {
    pub fn resource(&self) -> Option<Resource> {
        match self {
            BranchOutcome::Completed { resource } | BranchOutcome::Failed { resource, .. } => {
                Some(*resource)
            }
            BranchOutcome::Ignored { .. } => None,
        }
    }
}

/// Completion report of [`crate::ApiCaller::async_fetch`], one outcome per
/// accepter entry in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchSummary {
    pub outcomes: Vec<BranchOutcome>,
}

impl FetchSummary {
    /// Number of branches that actually ran.
    pub fn launched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.resource().is_some())
            .count()
    }

    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, BranchOutcome::Completed { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, BranchOutcome::Failed { .. }))
            .count()
    }

    pub fn ignored(&self) -> usize {
        self.outcomes.len() - self.launched()
    }
}
