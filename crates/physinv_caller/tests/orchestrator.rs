use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use physinv_caller::{
    ApiCaller, BranchOutcome, CallerError, CallerEvent, EventSink, RequestClient, TransportError,
    TransportKind,
};
use physinv_core::{header_filter, item_filter, QueryParams, RequestKey, Resource, FILTER_PARAM};
use pretty_assertions::assert_eq;
use reqwest::Method;

const BASE: &str = "https://sap.test/odata";
const HEADER_URL: &str = "https://sap.test/odata/API_PHYSICAL_INVENTORY_DOC_SRV/A_PhysInventoryDocHeader";
const ITEM_URL: &str = "https://sap.test/odata/API_PHYSICAL_INVENTORY_DOC_SRV/A_PhysInventoryDocItem";
const TO_ITEM_URL: &str = "https://sap.test/odata/API_PHYSICAL_INVENTORY_DOC_SRV/A_PhysInventoryDocHeader(FiscalYear='2021',PhysicalInventoryDocument='100000123')/to_PhysicalInventoryDocumentItem";

type Reply = Result<Vec<u8>, TransportError>;

#[derive(Default)]
struct StubClient {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    panics_on: Option<String>,
    calls: Mutex<Vec<(String, QueryParams)>>,
}

impl StubClient {
    fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    fn panic_on(mut self, url: &str) -> Self {
        self.panics_on = Some(url.to_string());
        self
    }

    fn calls(&self) -> Vec<(String, QueryParams)> {
        self.calls.lock().unwrap().clone()
    }

    fn called_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait::async_trait]
impl RequestClient for StubClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        query: &QueryParams,
        body: Option<&str>,
    ) -> Result<Vec<u8>, TransportError> {
        assert_eq!(method, Method::GET);
        assert!(body.is_none());
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), query.clone()));
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if self.panics_on.as_deref() == Some(url) {
            panic!("stub exploded for {url}");
        }
        self.replies.get(url).cloned().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportKind::HttpStatus(404),
                "404 Not Found",
            ))
        })
    }
}

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<CallerEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<CallerEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: CallerEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn key() -> RequestKey {
    RequestKey::new("2021", "100000123", "1")
}

fn header_body() -> Reply {
    Ok(format!(
        r#"{{"d":{{"results":[{{"FiscalYear":"2021","PhysicalInventoryDocument":"100000123","Plant":"1010","to_PhysicalInventoryDocumentItem":{{"__deferred":{{"uri":"{TO_ITEM_URL}"}}}}}}]}}}}"#
    )
    .into_bytes())
}

fn item_body(item: &str) -> Reply {
    Ok(format!(
        r#"{{"d":{{"results":[{{"FiscalYear":"2021","PhysicalInventoryDocument":"100000123","PhysicalInventoryDocumentItem":"{item}","Material":"TG11"}}]}}}}"#
    )
    .into_bytes())
}

fn happy_client() -> StubClient {
    StubClient::default()
        .reply(HEADER_URL, header_body())
        .reply(ITEM_URL, item_body("1"))
        .reply(TO_ITEM_URL, item_body("2"))
}

fn caller(client: Arc<StubClient>, sink: Arc<TestSink>) -> ApiCaller {
    ApiCaller::new(BASE, client, sink)
}

fn count_events(events: &[CallerEvent]) -> (usize, usize, usize, usize) {
    let mut counts = (0, 0, 0, 0);
    for event in events {
        match event {
            CallerEvent::Headers(_) => counts.0 += 1,
            CallerEvent::Items(_) => counts.1 += 1,
            CallerEvent::ToItems(_) => counts.2 += 1,
            CallerEvent::Failed { .. } => counts.3 += 1,
        }
    }
    counts
}

#[tokio::test]
async fn all_shorthand_runs_each_branch_once() {
    for accepter in [Vec::<String>::new(), vec!["All".to_string()]] {
        let client = Arc::new(happy_client());
        let sink = Arc::new(TestSink::default());

        let summary = caller(client.clone(), sink.clone())
            .async_fetch(&key(), accepter.as_slice())
            .await;

        assert_eq!(
            summary.outcomes,
            vec![
                BranchOutcome::Completed {
                    resource: Resource::Header
                },
                BranchOutcome::Completed {
                    resource: Resource::Item
                },
            ]
        );
        assert_eq!(count_events(&sink.take()), (1, 1, 1, 0));

        let mut urls = client.called_urls();
        urls.sort();
        assert_eq!(urls, vec![HEADER_URL, TO_ITEM_URL, ITEM_URL]);
    }
}

#[tokio::test]
async fn unrecognized_selector_is_a_silent_no_op() {
    let client = Arc::new(happy_client());
    let sink = Arc::new(TestSink::default());

    let summary = caller(client.clone(), sink.clone())
        .async_fetch(&key(), &["Bogus"])
        .await;

    assert_eq!(
        summary.outcomes,
        vec![BranchOutcome::Ignored {
            value: "Bogus".to_string()
        }]
    );
    assert_eq!(summary.launched(), 0);
    assert_eq!(summary.ignored(), 1);
    assert!(sink.take().is_empty());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn branches_receive_their_filters() {
    let client = Arc::new(happy_client());
    let sink = Arc::new(TestSink::default());

    caller(client.clone(), sink)
        .async_fetch(&key(), &["Header", "Item"])
        .await;

    let calls: HashMap<String, QueryParams> = client.calls().into_iter().collect();
    assert_eq!(
        calls[HEADER_URL].get(FILTER_PARAM),
        Some(&header_filter(&key()))
    );
    assert_eq!(calls[ITEM_URL].get(FILTER_PARAM), Some(&item_filter(&key())));
    assert!(calls[TO_ITEM_URL].is_empty());
}

#[tokio::test]
async fn returns_only_after_slow_branches_finish() {
    let client = Arc::new(
        happy_client()
            .delay(TO_ITEM_URL, Duration::from_millis(80))
            .delay(ITEM_URL, Duration::from_millis(40)),
    );
    let sink = Arc::new(TestSink::default());

    let summary = caller(client, sink.clone())
        .async_fetch(&key(), &["Header", "Item", "Header", "Nope"])
        .await;

    assert_eq!(summary.outcomes.len(), 4);
    assert_eq!(summary.completed(), 3);
    assert_eq!(summary.ignored(), 1);
    // Every terminal event is already in the sink, exactly once per branch.
    assert_eq!(count_events(&sink.take()), (2, 1, 2, 0));
}

#[tokio::test]
async fn branches_run_concurrently() {
    let branch_delay = Duration::from_millis(200);
    let client = Arc::new(
        happy_client()
            .delay(HEADER_URL, branch_delay)
            .delay(ITEM_URL, branch_delay),
    );
    let sink = Arc::new(TestSink::default());

    let started = Instant::now();
    let summary = caller(client, sink)
        .async_fetch(&key(), &["Header", "Item", "Header"])
        .await;
    let elapsed = started.elapsed();

    assert_eq!(summary.completed(), 3);
    assert!(elapsed >= branch_delay, "finished too early: {elapsed:?}");
    // Sequential branches would need three delays.
    assert!(
        elapsed < branch_delay * 2,
        "branches did not overlap: {elapsed:?}"
    );
}

#[tokio::test]
async fn empty_header_result_skips_navigation() {
    let client = Arc::new(
        StubClient::default().reply(HEADER_URL, Ok(br#"{"d":{"results":[]}}"#.to_vec())),
    );
    let sink = Arc::new(TestSink::default());

    let summary = caller(client.clone(), sink.clone())
        .async_fetch(&key(), &["Header"])
        .await;

    let expected_error = CallerError::EmptyResult {
        fiscal_year: "2021".to_string(),
        document_id: "100000123".to_string(),
    };
    assert_eq!(
        summary.outcomes,
        vec![BranchOutcome::Failed {
            resource: Resource::Header,
            error: expected_error.clone(),
        }]
    );
    assert_eq!(client.called_urls(), vec![HEADER_URL]);
    assert_eq!(
        sink.take(),
        vec![
            CallerEvent::Headers(Vec::new()),
            CallerEvent::Failed {
                resource: Resource::Header,
                error: expected_error,
            },
        ]
    );
}

#[tokio::test]
async fn header_without_link_fails_without_navigation() {
    let client = Arc::new(StubClient::default().reply(
        HEADER_URL,
        Ok(br#"{"d":{"results":[{"PhysicalInventoryDocument":"100000123"}]}}"#.to_vec()),
    ));
    let sink = Arc::new(TestSink::default());

    let summary = caller(client.clone(), sink)
        .async_fetch(&key(), &["Header"])
        .await;

    assert_eq!(
        summary.outcomes,
        vec![BranchOutcome::Failed {
            resource: Resource::Header,
            error: CallerError::MissingNavigationLink {
                document_id: "100000123".to_string()
            },
        }]
    );
    assert_eq!(client.called_urls(), vec![HEADER_URL]);
}

#[tokio::test]
async fn navigation_transport_error_is_logged_and_fetch_completes() {
    let failure = TransportError::new(TransportKind::Timeout, "operation timed out");
    let client = Arc::new(happy_client().reply(TO_ITEM_URL, Err(failure.clone())));
    let sink = Arc::new(TestSink::default());

    let summary = caller(client, sink.clone())
        .async_fetch(&key(), &["Header", "Item"])
        .await;

    assert_eq!(summary.completed(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(
        summary.outcomes[0],
        BranchOutcome::Failed {
            resource: Resource::Header,
            error: CallerError::Transport(failure.clone()),
        }
    );

    let events = sink.take();
    assert_eq!(count_events(&events), (1, 1, 0, 1));
    assert!(events.contains(&CallerEvent::Failed {
        resource: Resource::Header,
        error: CallerError::Transport(failure),
    }));
}

#[tokio::test]
async fn item_decode_failure_does_not_affect_header_branch() {
    let client = Arc::new(happy_client().reply(ITEM_URL, Ok(b"not json".to_vec())));
    let sink = Arc::new(TestSink::default());

    let summary = caller(client, sink.clone())
        .async_fetch(&key(), &["Item", "Header"])
        .await;

    assert!(matches!(
        &summary.outcomes[0],
        BranchOutcome::Failed {
            resource: Resource::Item,
            error: CallerError::Decode(_),
        }
    ));
    assert_eq!(
        summary.outcomes[1],
        BranchOutcome::Completed {
            resource: Resource::Header
        }
    );
    assert_eq!(count_events(&sink.take()), (1, 0, 1, 1));
}

#[tokio::test]
async fn header_failure_does_not_affect_item_branch() {
    let client = Arc::new(
        happy_client().reply(
            HEADER_URL,
            Err(TransportError::new(TransportKind::Network, "connection refused")),
        ),
    );
    let sink = Arc::new(TestSink::default());

    let summary = caller(client.clone(), sink.clone())
        .async_fetch(&key(), &["Header", "Item"])
        .await;

    assert_eq!(summary.failed(), 1);
    assert_eq!(
        summary.outcomes[1],
        BranchOutcome::Completed {
            resource: Resource::Item
        }
    );
    assert!(!client.called_urls().contains(&TO_ITEM_URL.to_string()));
    assert_eq!(count_events(&sink.take()), (0, 1, 0, 1));
}

#[tokio::test]
async fn panicking_branch_is_reported_as_aborted() {
    let client = Arc::new(happy_client().panic_on(ITEM_URL));
    let sink = Arc::new(TestSink::default());

    let summary = caller(client, sink.clone())
        .async_fetch(&key(), &["Header", "Item"])
        .await;

    assert_eq!(
        summary.outcomes[0],
        BranchOutcome::Completed {
            resource: Resource::Header
        }
    );
    assert!(matches!(
        &summary.outcomes[1],
        BranchOutcome::Failed {
            resource: Resource::Item,
            error: CallerError::Aborted { .. },
        }
    ));
    assert_eq!(count_events(&sink.take()), (1, 0, 1, 1));
}
