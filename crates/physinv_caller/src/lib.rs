//! Physical inventory caller: request client, event sink and the concurrent
//! fetch orchestrator.
mod caller;
mod client;
mod sink;
mod types;

pub use caller::ApiCaller;
pub use client::{RequestClient, RequestSettings, ReqwestRequestClient};
pub use sink::{EventSink, LogEventSink};
pub use types::{
    BranchOutcome, CallerError, CallerEvent, FetchSummary, TransportError, TransportKind,
};
