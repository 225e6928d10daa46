//! Transport layer for mirror-node REST and relay JSON-RPC traffic

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::ClientError;

/// JSON-RPC transport used by the relay client (object-safe)
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Send an RPC request and get the JSON `result`
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError>;
}

/// REST transport used by the mirror client (object-safe)
#[async_trait]
pub trait RestTransport: Send + Sync {
    /// GET `path` (including query string) and parse the body as JSON
    async fn get_json(&self, path: &str) -> Result<Value, ClientError>;
}

/// Helper to deserialize response
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

type Scripted = Result<Value, String>;

/// Per-key queues of scripted replies. The last reply of a queue repeats
/// for every later request.
#[derive(Default)]
struct Script {
    queues: HashMap<String, VecDeque<Scripted>>,
    requests: Vec<String>,
}

impl Script {
    fn next(&mut self, key: &str) -> Option<Scripted> {
        self.requests.push(key.to_string());
        let queue = self.queues.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn push(&mut self, key: &str, reply: Scripted) {
        self.queues.entry(key.to_string()).or_default().push_back(reply);
    }

    fn set(&mut self, key: &str, reply: Scripted) {
        self.queues.insert(key.to_string(), VecDeque::from([reply]));
    }
}

fn lock_script(script: &Mutex<Script>) -> Result<std::sync::MutexGuard<'_, Script>, ClientError> {
    script
        .lock()
        .map_err(|_| ClientError::Transport("mock transport mutex poisoned".to_string()))
}

/// Mock relay transport for testing
///
/// Clones share state, so a test can keep a handle for scripting after
/// moving one into a client.
#[derive(Clone)]
pub struct MockRpcTransport {
    script: Arc<Mutex<Script>>,
    defaults: Arc<HashMap<String, Value>>,
}

impl MockRpcTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        // Hedera local node defaults
        defaults.insert("eth_chainId".to_string(), Value::String("0x12a".to_string())); // 298
        defaults.insert("eth_gasPrice".to_string(), Value::String("0x1a3185c5000".to_string()));
        defaults.insert("eth_blockNumber".to_string(), Value::String("0x100".to_string()));
        defaults.insert("eth_getBalance".to_string(), Value::String("0x0".to_string()));
        defaults.insert("eth_getTransactionCount".to_string(), Value::String("0x0".to_string()));
        defaults.insert("eth_getCode".to_string(), Value::String("0x".to_string()));
        defaults.insert("eth_getTransactionReceipt".to_string(), Value::Null);

        Self {
            script: Arc::new(Mutex::new(Script::default())),
            defaults: Arc::new(defaults),
        }
    }

    /// Replace the reply for `method`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_response(&self, method: &str, response: Value) {
        self.script
            .lock()
            .expect("MockRpcTransport mutex poisoned")
            .set(method, Ok(response));
    }

    /// Queue a reply for `method` behind any already queued
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_response(&self, method: &str, response: Value) {
        self.script
            .lock()
            .expect("MockRpcTransport mutex poisoned")
            .push(method, Ok(response));
    }

    /// Queue a transport failure for `method`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_failure(&self, method: &str, message: &str) {
        self.script
            .lock()
            .expect("MockRpcTransport mutex poisoned")
            .push(method, Err(message.to_string()));
    }

    /// Methods requested so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.script
            .lock()
            .expect("MockRpcTransport mutex poisoned")
            .requests
            .clone()
    }
}

impl Default for MockRpcTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RpcTransport for MockRpcTransport {
    async fn request_json(&self, method: &str, _params: Vec<Value>) -> Result<Value, ClientError> {
        let scripted = lock_script(&self.script)?.next(method);
        match scripted {
            Some(Ok(value)) => return Ok(value),
            Some(Err(message)) => return Err(ClientError::Transport(message)),
            None => {}
        }

        if let Some(value) = self.defaults.get(method) {
            return Ok(value.clone());
        }

        Err(ClientError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }
}

/// Mock mirror-node transport for testing
///
/// Replies are keyed by the full request path including the query string.
/// Unscripted paths answer 404 like the mirror node does.
#[derive(Clone, Default)]
pub struct MockRestTransport {
    script: Arc<Mutex<Script>>,
}

impl MockRestTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the reply for `path`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_response(&self, path: &str, response: Value) {
        self.script
            .lock()
            .expect("MockRestTransport mutex poisoned")
            .set(path, Ok(response));
    }

    /// Queue a reply for `path` behind any already queued
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_response(&self, path: &str, response: Value) {
        self.script
            .lock()
            .expect("MockRestTransport mutex poisoned")
            .push(path, Ok(response));
    }

    /// Queue a transport failure for `path`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_failure(&self, path: &str, message: &str) {
        self.script
            .lock()
            .expect("MockRestTransport mutex poisoned")
            .push(path, Err(message.to_string()));
    }

    /// Paths requested so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.script
            .lock()
            .expect("MockRestTransport mutex poisoned")
            .requests
            .clone()
    }

    /// Number of requests made for `path`
    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| p.as_str() == path).count()
    }
}

#[async_trait]
impl RestTransport for MockRestTransport {
    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let scripted = lock_script(&self.script)?.next(path);
        match scripted {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(ClientError::Transport(message)),
            None => Err(ClientError::Http {
                status: 404,
                path: path.to_string(),
            }),
        }
    }
}

/// HTTP transport for the relay's JSON-RPC endpoint
#[cfg(feature = "http")]
pub struct HttpRpcTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpRpcTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": method,
            "params": params,
        });
        tracing::trace!(method, url = %self.url, "relay request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        // A missing result is a legitimate `null` (e.g. receipt not yet available)
        Ok(response.result.unwrap_or(Value::Null))
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// HTTP transport for the mirror node's REST API
#[cfg(feature = "http")]
pub struct HttpRestTransport {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpRestTransport {
    /// Create a transport for a mirror node base URL, e.g. `http://localhost:5551`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl RestTransport for HttpRestTransport {
    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::trace!(%url, "mirror request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_rpc_defaults() {
        let transport = MockRpcTransport::new();
        let result = transport.request_json("eth_chainId", vec![]).await.unwrap();
        assert_eq!(result, Value::String("0x12a".to_string()));
    }

    #[tokio::test]
    async fn test_mock_rpc_unknown_method() {
        let transport = MockRpcTransport::new();
        let err = transport.request_json("eth_foo", vec![]).await.unwrap_err();
        assert!(matches!(err, ClientError::Rpc { code: -32601, .. }));
    }

    #[tokio::test]
    async fn test_mock_rest_queue_last_reply_repeats() {
        let transport = MockRestTransport::new();
        transport.push_response("/a", serde_json::json!(1));
        transport.push_response("/a", serde_json::json!(2));

        assert_eq!(transport.get_json("/a").await.unwrap(), serde_json::json!(1));
        assert_eq!(transport.get_json("/a").await.unwrap(), serde_json::json!(2));
        assert_eq!(transport.get_json("/a").await.unwrap(), serde_json::json!(2));
        assert_eq!(transport.request_count("/a"), 3);
    }

    #[tokio::test]
    async fn test_mock_rest_unscripted_is_404() {
        let transport = MockRestTransport::new();
        let err = transport.get_json("/missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_rest_failure() {
        let transport = MockRestTransport::new();
        transport.push_failure("/a", "connection reset");
        let err = transport.get_json("/a").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(m) if m == "connection reset"));
    }

    #[tokio::test]
    async fn test_mock_clones_share_script() {
        let transport = MockRestTransport::new();
        let handle = transport.clone();
        handle.set_response("/a", serde_json::json!({"ok": true}));
        assert_eq!(transport.get_json("/a").await.unwrap()["ok"], true);
    }
}
