//! Delivery of finished simulations to an address. Delivery never affects
//! the simulation outcome.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use thiserror::Error;
use tracing::info;

use crate::simulation::result::LoanSimulation;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification channel closed")]
    Closed,
    #[error("delivery failed: {0}")]
    Delivery(String),
}

pub trait Notifier: Send + Sync {
    fn notify(&self, address: &str, simulation: &LoanSimulation) -> Result<(), NotifyError>;
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _address: &str, _simulation: &LoanSimulation) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Records each delivery in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, address: &str, simulation: &LoanSimulation) -> Result<(), NotifyError> {
        info!(
            address,
            payment = %simulation.periodic_payment,
            total = %simulation.final_value,
            currency = %simulation.currency,
            "simulation delivered"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub address: String,
    pub simulation: LoanSimulation,
}

/// In-memory queue. `notify` never blocks; a consumer drains the paired
/// [`NotificationQueue`].
#[derive(Debug)]
pub struct QueueNotifier {
    sender: Mutex<Sender<Notification>>,
}

#[derive(Debug)]
pub struct NotificationQueue {
    receiver: Receiver<Notification>,
}

impl QueueNotifier {
    pub fn channel() -> (Self, NotificationQueue) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                sender: Mutex::new(sender),
            },
            NotificationQueue { receiver },
        )
    }
}

impl Notifier for QueueNotifier {
    fn notify(&self, address: &str, simulation: &LoanSimulation) -> Result<(), NotifyError> {
        let sender = self
            .sender
            .lock()
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;
        sender
            .send(Notification {
                address: address.to_string(),
                simulation: simulation.clone(),
            })
            .map_err(|_| NotifyError::Closed)
    }
}

impl NotificationQueue {
    /// Everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.receiver.try_iter().collect()
    }
}
