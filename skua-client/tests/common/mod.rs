use skua_client::{resolver::OffsetsCluster, store::shared_store, ClientError, SharedOffsetStore};
use skua_protocol::{ListOffsetsTopic, TopicOffsets};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted stand-in for the cluster: hands back canned ListOffsets
/// results in order and records what the resolver asked for.
pub struct StubCluster {
    responses: Mutex<VecDeque<Result<Vec<TopicOffsets>, ClientError>>>,
    fetch_calls: AtomicUsize,
    seen_requests: Mutex<Vec<Vec<ListOffsetsTopic>>>,
    store: SharedOffsetStore,
}

impl StubCluster {
    pub fn new() -> StubCluster {
        StubCluster {
            responses: Mutex::new(VecDeque::new()),
            fetch_calls: AtomicUsize::new(0),
            seen_requests: Mutex::new(Vec::new()),
            store: shared_store(),
        }
    }

    pub fn returning(response: Vec<TopicOffsets>) -> StubCluster {
        let stub = StubCluster::new();
        stub.push(Ok(response));
        stub
    }

    pub fn failing(error: ClientError) -> StubCluster {
        let stub = StubCluster::new();
        stub.push(Err(error));
        stub
    }

    pub fn push(&self, response: Result<Vec<TopicOffsets>, ClientError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn seen_requests(&self) -> Vec<Vec<ListOffsetsTopic>> {
        self.seen_requests.lock().unwrap().clone()
    }

    pub fn store(&self) -> &SharedOffsetStore {
        &self.store
    }
}

impl OffsetsCluster for StubCluster {
    async fn fetch_topics_offset(
        &self,
        requests: &[ListOffsetsTopic],
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_requests.lock().unwrap().push(requests.to_vec());
        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(vec![]),
        }
    }

    fn offset_store(&self) -> &SharedOffsetStore {
        &self.store
    }
}
