//! Best-effort notification dispatch.
//!
//! Jobs go onto a bounded queue drained by a small worker pool. Delivery is
//! fire-and-forget: a failed send is logged and swallowed, and one job's
//! failure never affects its siblings or the operation that queued it.

use std::sync::mpsc::{self, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::store::Notifier;

/// A single notification to deliver. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationJob {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Jobs waiting for a free worker before `dispatch` applies backpressure.
const QUEUE_CAPACITY: usize = 64;

pub struct NotificationDispatcher {
    tx: Option<SyncSender<NotificationJob>>,
    workers: Vec<JoinHandle<()>>,
}

impl NotificationDispatcher {
    pub fn new<N>(notifier: Arc<N>, workers: usize) -> Self
    where
        N: Notifier + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::sync_channel::<NotificationJob>(QUEUE_CAPACITY);
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..workers.max(1))
            .map(|_| {
                let rx = Arc::clone(&rx);
                let notifier = Arc::clone(&notifier);
                thread::spawn(move || worker_loop(rx, notifier))
            })
            .collect();

        Self {
            tx: Some(tx),
            workers,
        }
    }

    /// Queues a job for delivery. Returns without waiting for the send;
    /// blocks only while the queue is full.
    pub fn dispatch(&self, job: NotificationJob) {
        if let Some(tx) = &self.tx
            && tx.send(job).is_err()
        {
            tracing::warn!("notification queue closed; job dropped");
        }
    }

    /// Closes the queue and waits for queued deliveries to finish.
    pub fn shutdown(mut self) {
        self.join_workers();
    }

    fn join_workers(&mut self) {
        self.tx.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for NotificationDispatcher {
    fn drop(&mut self) {
        self.join_workers();
    }
}

fn worker_loop<N: Notifier>(rx: Arc<Mutex<mpsc::Receiver<NotificationJob>>>, notifier: Arc<N>) {
    loop {
        let received = {
            let Ok(rx) = rx.lock() else {
                break;
            };
            rx.recv()
        };

        // All senders gone: queue is drained and closed.
        let Ok(job) = received else {
            break;
        };

        if let Err(e) = notifier.send(&job.recipient, &job.subject, &job.body) {
            tracing::warn!(recipient = %job.recipient, error = %e, "notification delivery failed");
        }
    }
}
