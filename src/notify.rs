use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::model::{Category, Event};

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for ledger events, one channel per category.
#[derive(Default)]
pub struct NotifyHub {
    channels: DashMap<Category, broadcast::Sender<Event>>,
}

impl NotifyHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events for a category. Creates the channel if needed.
    pub fn subscribe(&self, category: Category) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(category)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn send(&self, category: Category, event: &Event) {
        if let Some(sender) = self.channels.get(&category) {
            let _ = sender.send(event.clone());
        }
    }
}
