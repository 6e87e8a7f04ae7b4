//! Broker task and its handle
//!
//! The broker side owns the [`GeneDirectory`]; callers hold a cheap
//! [`BrokerHandle`]. Each dispatch pairs the request with a oneshot reply
//! channel that stays open until the adapter call resolves.

use crate::error::BrokerError;
use crate::message::{LookupRequest, LookupResponse};
use ntr_lookup::GeneDirectory;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug)]
struct Envelope {
    request: LookupRequest,
    reply: oneshot::Sender<LookupResponse>,
}

/// Caller-side handle for dispatching lookup requests
#[derive(Debug, Clone)]
pub struct BrokerHandle {
    sender: mpsc::Sender<Envelope>,
}

impl BrokerHandle {
    /// Dispatch a request and await its paired response.
    ///
    /// # Errors
    /// `BrokerError::Closed` if the broker task is gone.
    pub async fn dispatch(&self, request: LookupRequest) -> Result<LookupResponse, BrokerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(Envelope {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| BrokerError::Closed)?;
        reply_rx.await.map_err(|_| BrokerError::Closed)
    }
}

/// Routing layer exposing the lookup adapters across the isolation boundary
#[derive(Debug)]
pub struct LookupBroker;

impl LookupBroker {
    /// Spawn the broker task and return a handle to it.
    ///
    /// The task serves requests sequentially in arrival order; it exits
    /// when every handle has been dropped.
    #[must_use]
    pub fn spawn(directory: Arc<dyn GeneDirectory>) -> BrokerHandle {
        let (sender, mut receiver) = mpsc::channel::<Envelope>(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(Envelope { request, reply }) = receiver.recv().await {
                let action = request.action();
                tracing::debug!(%action, "broker received lookup task");
                let response = serve(directory.as_ref(), request).await;
                if reply.send(response).is_err() {
                    tracing::warn!(%action, "lookup requester went away before the response");
                }
            }
            tracing::debug!("lookup broker shutting down");
        });

        BrokerHandle { sender }
    }
}

/// Route one request to the matching adapter and normalize the outcome.
async fn serve(directory: &dyn GeneDirectory, request: LookupRequest) -> LookupResponse {
    match request {
        LookupRequest::LookupHuman(query) => {
            let Some(symbol) = query.gene_symbol else {
                return LookupResponse::error("lookupHuman request carries no gene symbol");
            };
            match directory.lookup_human(&symbol).await {
                Ok(details) => LookupResponse::Success { details },
                Err(e) => {
                    tracing::error!(%symbol, error = %e, "HGNC search failed");
                    LookupResponse::error(e.to_string())
                }
            }
        }
        LookupRequest::LookupNonHuman(query) => {
            let Some(symbol) = query.gene_symbol else {
                return LookupResponse::error("lookupNonHuman request carries no gene symbol");
            };
            let Some(organism) = query.animal else {
                return LookupResponse::error("lookupNonHuman request carries no organism");
            };
            match directory.lookup_non_human(&symbol, &organism).await {
                Ok(details) => LookupResponse::Success { details },
                Err(e) => {
                    tracing::error!(%symbol, %organism, error = %e, "NCBI search failed");
                    LookupResponse::error(e.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ntr_model::{GeneQuery, GeneRecord, GeneSource};
    use ntr_lookup::LookupError;
    use std::sync::Mutex;

    /// Directory double that records the order of adapter calls.
    #[derive(Default)]
    struct RecordingDirectory {
        calls: Mutex<Vec<String>>,
        human: Option<GeneRecord>,
        fail_non_human: bool,
    }

    #[async_trait]
    impl GeneDirectory for RecordingDirectory {
        async fn lookup_human(&self, symbol: &str) -> Result<Option<GeneRecord>, LookupError> {
            self.calls.lock().unwrap().push(format!("human:{symbol}"));
            Ok(self.human.clone())
        }

        async fn lookup_non_human(
            &self,
            symbol: &str,
            organism: &str,
        ) -> Result<Option<GeneRecord>, LookupError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("non-human:{symbol}:{organism}"));
            if self.fail_non_human {
                return Err(LookupError::Status {
                    provider: "NCBI esearch",
                    status: 502,
                });
            }
            Ok(None)
        }
    }

    fn kit_record() -> GeneRecord {
        GeneRecord::new(
            GeneSource::Hgnc,
            "HGNC:6342",
            "KIT proto-oncogene, receptor tyrosine kinase",
            "https://www.genenames.org/data/gene-symbol-report/#!/hgnc_id/HGNC:6342",
        )
    }

    #[tokio::test]
    async fn dispatch_routes_to_human_adapter() {
        let directory = Arc::new(RecordingDirectory {
            human: Some(kit_record()),
            ..Default::default()
        });
        let handle = LookupBroker::spawn(directory.clone());

        let response = handle
            .dispatch(LookupRequest::for_query(GeneQuery::human("KIT")))
            .await
            .unwrap();

        assert_eq!(
            response,
            LookupResponse::Success {
                details: Some(kit_record())
            }
        );
        assert_eq!(directory.calls.lock().unwrap().as_slice(), ["human:KIT"]);
    }

    #[tokio::test]
    async fn dispatch_routes_to_non_human_adapter_and_reports_not_found() {
        let directory = Arc::new(RecordingDirectory::default());
        let handle = LookupBroker::spawn(directory.clone());

        let response = handle
            .dispatch(LookupRequest::for_query(GeneQuery::non_human(
                "KIT",
                "Felis catus",
            )))
            .await
            .unwrap();

        assert_eq!(response, LookupResponse::Success { details: None });
        assert_eq!(
            directory.calls.lock().unwrap().as_slice(),
            ["non-human:KIT:Felis catus"]
        );
    }

    #[tokio::test]
    async fn adapter_failure_becomes_error_response() {
        let directory = Arc::new(RecordingDirectory {
            fail_non_human: true,
            ..Default::default()
        });
        let handle = LookupBroker::spawn(directory);

        let response = handle
            .dispatch(LookupRequest::for_query(GeneQuery::non_human(
                "KIT",
                "Felis catus",
            )))
            .await
            .unwrap();

        match response {
            LookupResponse::Error { message } => assert!(message.contains("502")),
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_request_resolves_to_error_not_panic() {
        let directory = Arc::new(RecordingDirectory::default());
        let handle = LookupBroker::spawn(directory.clone());

        let response = handle
            .dispatch(LookupRequest::LookupNonHuman(GeneQuery::human("KIT")))
            .await
            .unwrap();

        match response {
            LookupResponse::Error { message } => assert!(message.contains("no organism")),
            other => panic!("expected error response, got {other:?}"),
        }
        assert!(directory.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn responses_pair_with_requests_in_order() {
        let directory = Arc::new(RecordingDirectory {
            human: Some(kit_record()),
            ..Default::default()
        });
        let handle = LookupBroker::spawn(directory.clone());

        let first = handle.dispatch(LookupRequest::for_query(GeneQuery::human("KIT")));
        let second = handle.dispatch(LookupRequest::for_query(GeneQuery::non_human(
            "KIT",
            "Felis catus",
        )));
        let (first, second) = tokio::join!(first, second);

        assert!(matches!(
            first.unwrap(),
            LookupResponse::Success { details: Some(_) }
        ));
        assert!(matches!(
            second.unwrap(),
            LookupResponse::Success { details: None }
        ));
        assert_eq!(
            directory.calls.lock().unwrap().as_slice(),
            ["human:KIT", "non-human:KIT:Felis catus"]
        );
    }

    #[tokio::test]
    async fn dropped_broker_yields_closed_error() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let handle = BrokerHandle { sender };

        let result = handle
            .dispatch(LookupRequest::for_query(GeneQuery::human("KIT")))
            .await;
        assert_eq!(result.unwrap_err(), BrokerError::Closed);
    }
}
