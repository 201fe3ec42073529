use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{trace, warn};

/// Buffer size for channels created implicitly by `publish`/`subscribe`.
/// Registration traffic is low-volume; 128 pending events per type is ample.
const DEFAULT_CAPACITY: usize = 128;
const MIN_CAPACITY: usize = 1;

/// Supported channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Broadcast (fan-out) semantics.
    Broadcast { capacity: usize },
    /// MPSC (single consumer queue) semantics.
    Mpsc { capacity: usize },
}

impl ChannelKind {
    const fn capacity(self) -> usize {
        match self {
            Self::Broadcast { capacity } | Self::Mpsc { capacity } => capacity,
        }
    }

    const fn same_family(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Broadcast { .. }, Self::Broadcast { .. }) | (Self::Mpsc { .. }, Self::Mpsc { .. })
        )
    }
}

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct Queue<T> {
    sender: mpsc::Sender<Arc<T>>,
    receiver: Option<mpsc::Receiver<Arc<T>>>,
}

/// Type-erased channel registered for one event type.
#[derive(Debug)]
struct ChannelEntry {
    kind: ChannelKind,
    channel: Box<dyn Any + Send + Sync>,
}

impl ChannelEntry {
    fn new<T: Event>(kind: ChannelKind) -> Self {
        trace!(event = type_name::<T>(), ?kind, "Initializing new event channel");
        let channel: Box<dyn Any + Send + Sync> = match kind {
            ChannelKind::Broadcast { capacity } => {
                Box::new(broadcast::channel::<Arc<T>>(capacity).0)
            },
            ChannelKind::Mpsc { capacity } => {
                let (sender, receiver) = mpsc::channel::<Arc<T>>(capacity);
                Box::new(Queue { sender, receiver: Some(receiver) })
            },
        };
        Self { kind, channel }
    }

    fn check_kind<T: Event>(&self, requested: ChannelKind) -> Result<(), EventBusError> {
        if !self.kind.same_family(requested) {
            return Err(EventBusError::ChannelKindMismatch {
                message: format!(
                    "Expected {requested:?} but found {:?} for {}",
                    self.kind,
                    type_name::<T>()
                )
                .into(),
                context: None,
            });
        }
        if self.kind.capacity() != requested.capacity() {
            warn!(
                event = type_name::<T>(),
                existing_capacity = self.kind.capacity(),
                requested_capacity = requested.capacity(),
                "Channel already initialized with a different capacity"
            );
        }
        Ok(())
    }

    /// `capacity: None` accepts whatever capacity the channel was created with.
    fn broadcast<T: Event>(
        &self,
        capacity: Option<usize>,
    ) -> Result<&broadcast::Sender<Arc<T>>, EventBusError> {
        let capacity = capacity.unwrap_or_else(|| self.kind.capacity());
        self.check_kind::<T>(ChannelKind::Broadcast { capacity })?;
        self.channel.downcast_ref::<broadcast::Sender<Arc<T>>>().ok_or_else(type_mismatch::<T>)
    }

    fn queue<T: Event>(&mut self, capacity: Option<usize>) -> Result<&mut Queue<T>, EventBusError> {
        let capacity = capacity.unwrap_or_else(|| self.kind.capacity());
        self.check_kind::<T>(ChannelKind::Mpsc { capacity })?;
        self.channel.downcast_mut::<Queue<T>>().ok_or_else(type_mismatch::<T>)
    }
}

/// A thread-safe, cloneable event bus.
///
/// Manages channels indexed by the [`TypeId`] of the event. Clones share the
/// same channel registry.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelEntry>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to broadcasts of `T` using the default capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a queue.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to broadcasts of `T` with a specific buffer capacity.
    ///
    /// The capacity only takes effect when this call creates the channel.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a queue,
    /// or [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    /// ```rust
    /// use signup_event_bus::EventBus;
    ///
    /// #[derive(Clone, Debug)]
    /// struct Tick(u64);
    ///
    /// # fn main() -> Result<(), signup_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let _rx = bus.subscribe_with_capacity::<Tick>(16)?;
    /// assert_eq!(bus.subscriber_count::<Tick>(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        let sender = self.broadcast_sender::<T>(Some(capacity))?;
        Ok(sender.subscribe())
    }

    /// Takes the single consumer end of the bounded queue for `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to broadcast,
    /// [`EventBusError::ReceiverTaken`] if the consumer was already taken, or
    /// [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    /// ```rust
    /// use signup_event_bus::EventBus;
    ///
    /// #[derive(Clone, Debug)]
    /// struct OutgoingMail(String);
    ///
    /// # fn main() -> Result<(), signup_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let _rx = bus.subscribe_mpsc::<OutgoingMail>(8)?;
    /// assert!(bus.subscribe_mpsc::<OutgoingMail>(8).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe_mpsc<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<mpsc::Receiver<Arc<T>>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        let kind = ChannelKind::Mpsc { capacity };
        let mut channels = self.channels.write();
        let entry = channels.entry(TypeId::of::<T>()).or_insert_with(|| ChannelEntry::new::<T>(kind));
        entry.queue::<T>(Some(capacity))?.receiver.take().ok_or_else(|| EventBusError::ReceiverTaken {
            message: "MPSC receiver already taken".into(),
            context: Some(type_name::<T>().into()),
        })
    }

    /// Broadcasts an event to every current subscriber of `T`.
    ///
    /// Returns the number of subscribers the event was delivered to. Publishing
    /// without subscribers is not an error; the event is dropped and `0` is returned.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a queue.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Broadcasts a shared event instance without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a queue.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.broadcast_sender::<T>(None)?;
        let delivered = sender.send(event).unwrap_or(0);
        if delivered == 0 {
            trace!(event = type_name::<T>(), "Event dropped: no active subscribers");
        } else {
            trace!(event = type_name::<T>(), delivered, "Event dispatched");
        }
        Ok(delivered)
    }

    /// Enqueues an event on the bounded queue for `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to broadcast,
    /// [`EventBusError::ChannelFull`] if the queue is full, or
    /// [`EventBusError::ChannelClosed`] if the consumer was dropped.
    pub fn publish_mpsc<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        let sender = self.queue_sender::<T>()?;
        sender.try_send(Arc::new(event)).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => EventBusError::ChannelFull {
                message: "queue is at capacity".into(),
                context: Some(type_name::<T>().into()),
            },
            mpsc::error::TrySendError::Closed(_) => EventBusError::ChannelClosed {
                message: "queue consumer dropped".into(),
                context: Some(type_name::<T>().into()),
            },
        })
    }

    /// Enqueues an event on the bounded queue for `T`, waiting for room when
    /// the queue is full.
    ///
    /// The registry lock is released before waiting.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to broadcast,
    /// or [`EventBusError::ChannelClosed`] if the consumer was dropped.
    pub async fn publish_mpsc_async<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        let sender = self.queue_sender::<T>()?;
        sender.send(Arc::new(event)).await.map_err(|_| EventBusError::ChannelClosed {
            message: "queue consumer dropped".into(),
            context: Some(type_name::<T>().into()),
        })?;
        trace!(event = type_name::<T>(), "Event queued");
        Ok(())
    }

    /// Number of live receivers for `T`.
    ///
    /// For broadcast channels this is the subscriber count; for queues it is `1`
    /// once the consumer has been taken. Unknown types report `0`.
    #[must_use]
    pub fn subscriber_count<T: Event>(&self) -> usize {
        let channels = self.channels.read();
        let Some(entry) = channels.get(&TypeId::of::<T>()) else {
            return 0;
        };
        match entry.kind {
            ChannelKind::Broadcast { .. } => entry
                .channel
                .downcast_ref::<broadcast::Sender<Arc<T>>>()
                .map_or(0, broadcast::Sender::receiver_count),
            ChannelKind::Mpsc { .. } => entry
                .channel
                .downcast_ref::<Queue<T>>()
                .map_or(0, |q| usize::from(q.receiver.is_none() && !q.sender.is_closed())),
        }
    }

    /// Gracefully shuts down the bus by dropping all underlying channels.
    ///
    /// Returns the number of event channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn broadcast_sender<T: Event>(
        &self,
        capacity: Option<usize>,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        if let Some(entry) = self.channels.read().get(&id) {
            return entry.broadcast::<T>(capacity).cloned();
        }

        let kind = ChannelKind::Broadcast { capacity: capacity.unwrap_or(DEFAULT_CAPACITY) };
        let mut channels = self.channels.write();
        let entry = channels.entry(id).or_insert_with(|| ChannelEntry::new::<T>(kind));
        entry.broadcast::<T>(capacity).cloned()
    }

    fn queue_sender<T: Event>(&self) -> Result<mpsc::Sender<Arc<T>>, EventBusError> {
        let kind = ChannelKind::Mpsc { capacity: DEFAULT_CAPACITY };
        let mut channels = self.channels.write();
        let entry = channels.entry(TypeId::of::<T>()).or_insert_with(|| ChannelEntry::new::<T>(kind));
        entry.queue::<T>(None).map(|q| q.sender.clone())
    }
}

fn type_mismatch<T: Event>() -> EventBusError {
    EventBusError::TypeMismatch {
        message: type_name::<T>().into(),
        context: Some("Unexpected event type".into()),
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity < MIN_CAPACITY {
        return Err(EventBusError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
