use std::sync::Arc;

use crate::directory::UserDirectory;
use crate::kafka::NotificationSink;
use crate::publisher::NotificationPublisher;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppContext {
    pub publisher: Arc<NotificationPublisher>,
}

impl AppContext {
    pub fn new(directory: Arc<dyn UserDirectory>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            publisher: Arc::new(NotificationPublisher::new(directory, sink)),
        }
    }
}
