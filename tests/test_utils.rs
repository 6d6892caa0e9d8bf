#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use kafka_notify::{
    context::AppContext,
    directory::{StaticDirectory, UserDirectory},
    kafka::{DeliveryReceipt, NotificationSink},
    models::{User, UserId},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Sink that keeps every record in memory instead of talking to Kafka
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<(String, Vec<u8>)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, key: &str, payload: &[u8]) -> Result<DeliveryReceipt> {
        let mut records = self.records.lock().unwrap();
        records.push((key.to_string(), payload.to_vec()));
        Ok(DeliveryReceipt {
            partition: 0,
            offset: records.len() as i64 - 1,
        })
    }

    fn topic(&self) -> &str {
        "notification"
    }
}

/// Sink whose broker never acknowledges anything
pub struct FailingSink {
    pub error: String,
}

#[async_trait]
impl NotificationSink for FailingSink {
    async fn send(&self, _key: &str, _payload: &[u8]) -> Result<DeliveryReceipt> {
        Err(anyhow::anyhow!("{}", self.error))
    }

    fn topic(&self) -> &str {
        "notification"
    }
}

/// Directory that counts how often it is asked to resolve an id
pub struct CountingDirectory {
    inner: StaticDirectory,
    lookups: AtomicUsize,
}

impl CountingDirectory {
    pub fn new(inner: StaticDirectory) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl UserDirectory for CountingDirectory {
    fn resolve(&self, id: UserId) -> Option<User> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(id)
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn post_form(&self, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url("/send"))
            .form(fields)
            .send()
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub fn test_directory() -> StaticDirectory {
    StaticDirectory::new(vec![User::new(1, "Emma"), User::new(2, "Bruno")])
}

/// Start the HTTP surface on an ephemeral port with the given sink
pub async fn spawn_app(sink: Arc<dyn NotificationSink>) -> TestApp {
    spawn_app_with(Arc::new(test_directory()), sink).await
}

/// Start the HTTP surface with a caller-supplied directory and sink
pub async fn spawn_app_with(
    directory: Arc<dyn UserDirectory>,
    sink: Arc<dyn NotificationSink>,
) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let app_context = Arc::new(AppContext::new(directory, sink));
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        kafka_notify::serve(listener, app_context, shutdown)
            .await
            .expect("Server failed");
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
        shutdown: Some(tx),
    }
}
