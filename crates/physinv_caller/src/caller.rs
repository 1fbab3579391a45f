use std::sync::Arc;

use physinv_core::{
    convert_to_header, convert_to_item, convert_to_to_item, entity_url, expand_accepter,
    filter_query, Header, Item, QueryParams, RequestKey, Resource, SelectorEntry, ToItem,
};
use reqwest::Method;
use tokio::task::JoinHandle;

use crate::client::RequestClient;
use crate::sink::EventSink;
use crate::{BranchOutcome, CallerError, CallerEvent, FetchSummary};

/// Fetches physical inventory documents, one concurrent branch per requested
/// resource.
///
/// Cloning is cheap; clones share the request client and event sink.
#[derive(Clone)]
pub struct ApiCaller {
    base_url: Arc<str>,
    client: Arc<dyn RequestClient>,
    sink: Arc<dyn EventSink>,
}

enum Pending {
    Running(Resource, JoinHandle<Result<(), CallerError>>),
    Done(BranchOutcome),
}

impl ApiCaller {
    pub fn new(
        base_url: impl Into<String>,
        client: Arc<dyn RequestClient>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.into(),
            client,
            sink,
        }
    }

    /// Runs every branch named by `accepter` concurrently and returns once all
    /// of them have finished.
    ///
    /// Branch failures are emitted to the sink and reported in the summary;
    /// they never stop the other branches. Unrecognized accepter values are
    /// reported as ignored without emitting anything.
    pub async fn async_fetch<S: AsRef<str>>(
        &self,
        key: &RequestKey,
        accepter: &[S],
    ) -> FetchSummary {
        let pending: Vec<Pending> = expand_accepter(accepter)
            .into_iter()
            .map(|entry| match entry {
                SelectorEntry::Fetch(resource) => {
                    let caller = self.clone();
                    let key = key.clone();
                    let handle =
                        tokio::spawn(async move { caller.run_branch(resource, &key).await });
                    Pending::Running(resource, handle)
                }
                SelectorEntry::Ignored(value) => Pending::Done(BranchOutcome::Ignored { value }),
            })
            .collect();

        let mut outcomes = Vec::with_capacity(pending.len());
        for entry in pending {
            let outcome = match entry {
                Pending::Done(outcome) => outcome,
                Pending::Running(resource, handle) => match handle.await {
                    Ok(Ok(())) => BranchOutcome::Completed { resource },
                    Ok(Err(error)) => BranchOutcome::Failed { resource, error },
                    Err(join_err) => {
                        let error = CallerError::Aborted {
                            message: join_err.to_string(),
                        };
                        self.sink.emit(CallerEvent::Failed {
                            resource,
                            error: error.clone(),
                        });
                        BranchOutcome::Failed { resource, error }
                    }
                },
            };
            outcomes.push(outcome);
        }

        FetchSummary { outcomes }
    }

    async fn run_branch(&self, resource: Resource, key: &RequestKey) -> Result<(), CallerError> {
        let result = match resource {
            Resource::Header => self.header_branch(key).await,
            Resource::Item => self.item_branch(key).await,
        };
        if let Err(error) = &result {
            self.sink.emit(CallerEvent::Failed {
                resource,
                error: error.clone(),
            });
        }
        result
    }

    async fn header_branch(&self, key: &RequestKey) -> Result<(), CallerError> {
        let headers = self.call_header(key).await?;
        let first = headers
            .first()
            .map(|header| (header.to_item.clone(), header.physical_inventory_document.clone()));
        self.sink.emit(CallerEvent::Headers(headers));

        let link = match first {
            None => {
                return Err(CallerError::EmptyResult {
                    fiscal_year: key.fiscal_year.clone(),
                    document_id: key.document_id.clone(),
                })
            }
            Some((None, document_id)) => {
                return Err(CallerError::MissingNavigationLink { document_id })
            }
            Some((Some(link), _)) => link,
        };

        let to_items = self.call_to_item(&link).await?;
        self.sink.emit(CallerEvent::ToItems(to_items));
        Ok(())
    }

    async fn item_branch(&self, key: &RequestKey) -> Result<(), CallerError> {
        let items = self.call_item(key).await?;
        self.sink.emit(CallerEvent::Items(items));
        Ok(())
    }

    async fn call_header(&self, key: &RequestKey) -> Result<Vec<Header>, CallerError> {
        let bytes = self.get_entity_set(Resource::Header, key).await?;
        Ok(convert_to_header(&bytes)?)
    }

    async fn call_item(&self, key: &RequestKey) -> Result<Vec<Item>, CallerError> {
        let bytes = self.get_entity_set(Resource::Item, key).await?;
        Ok(convert_to_item(&bytes)?)
    }

    // The navigation link is absolute and already scoped; no filter is added.
    async fn call_to_item(&self, url: &str) -> Result<Vec<ToItem>, CallerError> {
        let bytes = self
            .client
            .request(Method::GET, url, &QueryParams::new(), None)
            .await?;
        Ok(convert_to_to_item(&bytes)?)
    }

    async fn get_entity_set(
        &self,
        resource: Resource,
        key: &RequestKey,
    ) -> Result<Vec<u8>, CallerError> {
        let url = entity_url(&self.base_url, resource);
        let query = filter_query(resource, key);
        Ok(self.client.request(Method::GET, &url, &query, None).await?)
    }
}
