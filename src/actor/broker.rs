use tokio::sync::broadcast;

use crate::actor::model::InternalMessage;

const CHANNEL_CAPACITY: usize = 100;

/// Fan-out channel for game events. Publishing never blocks and succeeds
/// even when nobody is listening.
#[derive(Clone, Debug)]
pub struct Broker {
    sender: broadcast::Sender<InternalMessage>,
}

impl Broker {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Broker { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InternalMessage> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers the message reached.
    pub fn publish(&self, message: InternalMessage) -> usize {
        self.sender.send(message).unwrap_or(0)
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let broker = Broker::new();
        let mut first = broker.subscribe();
        let mut second = broker.subscribe();

        assert_eq!(broker.publish(InternalMessage::Stop), 2);

        assert!(matches!(first.recv().await, Ok(InternalMessage::Stop)));
        assert!(matches!(second.recv().await, Ok(InternalMessage::Stop)));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let broker = Broker::new();

        assert_eq!(broker.publish(InternalMessage::Stop), 0);
    }
}
