//! Event bus port: publish change notifications to renderers.

use roikit_domain::error::RoikitError;
use roikit_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying transport rejects the event.
    fn publish(&self, event: Event) -> Result<(), RoikitError>;
}

impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> Result<(), RoikitError> {
        (**self).publish(event)
    }
}

impl<T: EventPublisher + ?Sized> EventPublisher for &T {
    fn publish(&self, event: Event) -> Result<(), RoikitError> {
        (**self).publish(event)
    }
}

/// Publisher that drops every event, for callers with no renderer attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
    fn publish(&self, _event: Event) -> Result<(), RoikitError> {
        Ok(())
    }
}
