//! Event types for the PGV gallery client
//!
//! Provides the shared event definitions and the EventBus connecting the
//! browsing session to its renderers (grid, navigation bar, viewer overlay).
//! Renderers subscribe and re-render from the session snapshot on each
//! event; the session never mutates a renderer directly.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Gallery event types
///
/// Events are broadcast via EventBus and can be serialized for diagnostic
/// output or transmission to an out-of-process renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GalleryEvent {
    /// A new page replaced the current one
    ///
    /// Triggers:
    /// - Grid: re-render the image list
    /// - Navigation bar: re-render the link set
    PageLoaded {
        /// Number of images on the new page
        image_count: usize,
        /// Names of the navigation links the page carries
        links: Vec<String>,
        /// When the page was applied
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The viewer overlay is (now) showing an image
    ///
    /// Triggers:
    /// - Viewer overlay: display the image at `url`
    ViewerShown {
        /// Index of the displayed image within the current page
        index: usize,
        /// Absolute URL of the displayed image
        url: String,
        /// When the viewer position changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The viewer overlay was closed
    ViewerHidden {
        /// When the viewer was hidden
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The gallery filter was replaced, discarding all page state
    FilterChanged {
        /// Collection path of the new filter
        path: String,
        /// When the filter changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A successful fetch returned a page with no images
    ///
    /// The page is still applied (the grid shows an empty collection); the
    /// viewer is hidden because no image position can be resolved.
    EmptyPage {
        /// When the empty page was applied
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A page fetch failed; prior page and viewer state are untouched
    FetchFailed {
        /// Error description
        error: String,
        /// When the fetch failed
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl GalleryEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            GalleryEvent::PageLoaded { .. } => "PageLoaded",
            GalleryEvent::ViewerShown { .. } => "ViewerShown",
            GalleryEvent::ViewerHidden { .. } => "ViewerHidden",
            GalleryEvent::FilterChanged { .. } => "FilterChanged",
            GalleryEvent::EmptyPage { .. } => "EmptyPage",
            GalleryEvent::FetchFailed { .. } => "FetchFailed",
        }
    }
}

/// Central event distribution bus for gallery events
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block the session)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<GalleryEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the given channel capacity
    ///
    /// `capacity` is the number of events buffered before old events are
    /// dropped for lagging subscribers.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<GalleryEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if no subscribers are listening.
    pub fn emit(
        &self,
        event: GalleryEvent,
    ) -> std::result::Result<usize, broadcast::error::SendError<GalleryEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring whether any subscriber is listening
    ///
    /// Used for all session notifications: a gallery with no renderer
    /// attached is still a valid gallery.
    pub fn emit_lossy(&self, event: GalleryEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
