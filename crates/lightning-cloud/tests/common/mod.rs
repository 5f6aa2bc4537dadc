use async_trait::async_trait;
use lightning_cloud::{
    AwsClusterDriverSpec, CancellationToken, ClusterDriver, ClusterError, ClusterSnapshot,
    ClusterSpec, ClusterState, ClusterStateClient, CreateClusterRequest, KubernetesClusterDriver,
    Result,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// In-memory control plane
///
/// `get` replays the scripted snapshots in order and keeps returning the last
/// one once the script is exhausted.
#[derive(Default)]
pub struct FakeClusterClient {
    get_responses: Mutex<VecDeque<ClusterSnapshot>>,
    last_get: Mutex<Option<ClusterSnapshot>>,
    list_response: Mutex<Vec<ClusterSnapshot>>,
    create_id: Mutex<Option<String>>,
    cancel_on_get: Mutex<Option<CancellationToken>>,
    cancel_after_mutation: Mutex<Option<CancellationToken>>,
    hang_on_get: Mutex<bool>,
    pub get_calls: Mutex<Vec<String>>,
    pub create_calls: Mutex<Vec<CreateClusterRequest>>,
    pub delete_calls: Mutex<Vec<(String, bool)>>,
    pub list_calls: Mutex<Vec<Vec<ClusterState>>>,
}

impl FakeClusterClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get_responses(self, responses: Vec<ClusterSnapshot>) -> Self {
        *self.get_responses.lock().unwrap() = responses.into();
        self
    }

    pub fn with_create_id(self, id: &str) -> Self {
        *self.create_id.lock().unwrap() = Some(id.to_string());
        self
    }

    pub fn with_list_response(self, clusters: Vec<ClusterSnapshot>) -> Self {
        *self.list_response.lock().unwrap() = clusters;
        self
    }

    /// Cancel `token` from inside the first `get`, as if Ctrl-C arrived
    /// while the request was in flight
    pub fn cancelling_on_get(self, token: &CancellationToken) -> Self {
        *self.cancel_on_get.lock().unwrap() = Some(token.clone());
        self
    }

    /// Cancel `token` right after `create` or `delete` was accepted
    pub fn cancelling_after_mutation(self, token: &CancellationToken) -> Self {
        *self.cancel_after_mutation.lock().unwrap() = Some(token.clone());
        self
    }

    /// Make every `get` hang, like a control plane that never answers
    pub fn hanging_on_get(self) -> Self {
        *self.hang_on_get.lock().unwrap() = true;
        self
    }

    fn fire(slot: &Mutex<Option<CancellationToken>>) {
        if let Some(token) = slot.lock().unwrap().take() {
            token.cancel();
        }
    }

    pub fn get_call_count(&self) -> usize {
        self.get_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ClusterStateClient for FakeClusterClient {
    async fn get(&self, id: &str) -> Result<ClusterSnapshot> {
        self.get_calls.lock().unwrap().push(id.to_string());
        Self::fire(&self.cancel_on_get);
        let hang = *self.hang_on_get.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }
        let next = self.get_responses.lock().unwrap().pop_front();
        let mut last = self.last_get.lock().unwrap();
        if let Some(snapshot) = next {
            *last = Some(snapshot);
        }
        last.clone()
            .ok_or_else(|| ClusterError::NotFound(id.to_string()))
    }

    async fn create(&self, request: &CreateClusterRequest) -> Result<String> {
        self.create_calls.lock().unwrap().push(request.clone());
        Self::fire(&self.cancel_after_mutation);
        self.create_id
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClusterError::Api("create rejected".to_string()))
    }

    async fn delete(&self, id: &str, force: bool) -> Result<()> {
        self.delete_calls
            .lock()
            .unwrap()
            .push((id.to_string(), force));
        Self::fire(&self.cancel_after_mutation);
        Ok(())
    }

    async fn list(&self, exclude_phases: &[ClusterState]) -> Result<Vec<ClusterSnapshot>> {
        self.list_calls.lock().unwrap().push(exclude_phases.to_vec());
        Ok(self.list_response.lock().unwrap().clone())
    }
}

pub fn spec_with_bucket(bucket: &str) -> ClusterSpec {
    ClusterSpec {
        driver: Some(ClusterDriver {
            kubernetes: Some(KubernetesClusterDriver {
                aws: Some(AwsClusterDriverSpec {
                    bucket_name: Some(bucket.to_string()),
                    ..Default::default()
                }),
            }),
        }),
        ..Default::default()
    }
}

pub fn snapshot(state: ClusterState) -> ClusterSnapshot {
    ClusterSnapshot::new("test-cluster", "test-cluster", state).with_spec(spec_with_bucket("test-bucket"))
}
