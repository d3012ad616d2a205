//! Browsing session: the single current page and viewer state
//!
//! `GallerySession` ties the page loader and the navigator together. It
//! holds exactly one page at a time behind an `Arc` that is swapped
//! atomically when a load completes, so consumers never observe a
//! partially updated image list. User navigation goes through the
//! navigator first; only a step off a page edge delegates back to the
//! loader, using the page's named link for that direction.
//!
//! Concurrent loads are resolved by sequence tagging: every load takes a
//! monotonically increasing number and a result is applied only while its
//! number is still the latest issued. A superseded result, success or
//! failure, is discarded. `close()` invalidates everything in flight so no
//! state changes after teardown.

use crate::filter::GalleryFilter;
use crate::loader::PageLoader;
use crate::navigator::{self, Step, ViewerState};
use crate::page::{InitialPosition, Page, PageLink, PhotoImage};
use pgv_common::events::{EventBus, GalleryEvent};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

/// One page-load intent
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// Cursor token of the page to fetch; `None` requests the first page
    pub cursor: Option<String>,
    /// Whether the viewer becomes visible, pointed at the resolved position
    pub reveal: bool,
    /// Initial viewer position on the new page
    pub position: InitialPosition,
}

impl LoadRequest {
    /// Unparameterized first-page request, grid only
    pub fn first_page() -> Self {
        Self {
            cursor: None,
            reveal: false,
            position: InitialPosition::FirstOfPage,
        }
    }

    /// Cursor request from a named navigation link, grid only
    pub fn link(cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            reveal: false,
            position: InitialPosition::FirstOfPage,
        }
    }

    /// Cursor request from a viewer boundary crossing: reveal the viewer at
    /// the given edge of the new page
    fn boundary(cursor: String, position: InitialPosition) -> Self {
        Self {
            cursor: Some(cursor),
            reveal: true,
            position,
        }
    }
}

/// Render contract for the external collaborators
#[derive(Debug, Clone, Serialize)]
pub struct GallerySnapshot {
    /// Image list for the grid renderer
    pub images: Vec<PhotoImage>,
    /// Navigation links for the navigation-bar renderer, sorted by name
    pub links: Vec<PageLink>,
    /// Viewer overlay state
    pub viewer: ViewerSnapshot,
}

/// Viewer overlay portion of the snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ViewerSnapshot {
    /// Whether the overlay is open
    pub visible: bool,
    /// Position within the current page; meaningful only while a non-empty
    /// page is loaded
    pub index: usize,
    /// URL of the image at the current position, derived from the held
    /// page at snapshot time
    pub url: Option<String>,
}

#[derive(Default)]
struct SessionState {
    page: Option<Arc<Page>>,
    viewer: ViewerState,
}

/// Deferred step outcome, decided under the state lock and acted on after
/// releasing it
enum StepAction {
    Shown(usize, String),
    Fetch(LoadRequest),
}

/// Gallery browsing session
pub struct GallerySession {
    loader: PageLoader,
    events: EventBus,
    filter: Mutex<GalleryFilter>,
    state: Mutex<SessionState>,
    issued: AtomicU64,
    closed: AtomicBool,
}

impl GallerySession {
    /// Create a session browsing `filter` through `loader`
    pub fn new(loader: PageLoader, filter: GalleryFilter) -> Self {
        Self {
            loader,
            events: EventBus::default(),
            filter: Mutex::new(filter),
            state: Mutex::new(SessionState::default()),
            issued: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Event bus carrying the session's notifications
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Currently active filter
    pub fn filter(&self) -> GalleryFilter {
        self.filter.lock().expect("filter lock poisoned").clone()
    }

    /// Fetch a page and, on success, make it the current one
    ///
    /// A failure is absorbed here: it is logged, reported as `FetchFailed`,
    /// and leaves the prior page and viewer state untouched. A result
    /// arriving after a newer load was issued (or after `close()`) is
    /// discarded.
    pub async fn load(&self, request: LoadRequest) {
        if self.closed.load(Ordering::SeqCst) {
            debug!("Session closed, ignoring load");
            return;
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.filter();

        match self.loader.fetch_page(&filter, request.cursor.as_deref()).await {
            Ok(page) => self.apply_page(seq, page, &request),
            Err(err) => {
                if self.superseded(seq) {
                    debug!(seq, "Discarding failure of superseded load");
                    return;
                }
                error!(error = %err, "Failed to fetch gallery page");
                self.events.emit_lossy(GalleryEvent::FetchFailed {
                    error: err.to_string(),
                    timestamp: chrono::Utc::now(),
                });
            }
        }
    }

    /// Follow a named navigation link (navigation-bar click)
    ///
    /// Only the grid and link state update; viewer visibility is carried
    /// over and its position resets to the first image.
    pub async fn open_link(&self, cursor: impl Into<String>) {
        self.load(LoadRequest::link(cursor)).await;
    }

    /// Replace the filter wholesale and reload from the first page
    ///
    /// Discards the held page immediately; viewer visibility is carried
    /// over, the position resets to first-of-page.
    pub async fn set_filter(&self, filter: GalleryFilter) {
        let path = filter.path().to_string();
        *self.filter.lock().expect("filter lock poisoned") = filter;
        {
            let mut state = self.state.lock().expect("state lock poisoned");
            state.page = None;
            state.viewer.index = 0;
        }
        self.events.emit_lossy(GalleryEvent::FilterChanged {
            path,
            timestamp: chrono::Utc::now(),
        });
        self.load(LoadRequest::first_page()).await;
    }

    /// Open the viewer on the image at `index` (grid click)
    ///
    /// An index outside the current page, or a missing page, is ignored
    /// with a warning.
    pub fn show(&self, index: usize) {
        let shown = {
            let mut state = self.state.lock().expect("state lock poisoned");
            let Some(page) = state.page.clone() else {
                warn!(index, "show with no page loaded, ignoring");
                return;
            };
            let Some(image) = page.image(index) else {
                warn!(index, len = page.len(), "show index out of range, ignoring");
                return;
            };
            state.viewer.index = index;
            state.viewer.visible = true;
            (index, image.view_url.clone())
        };

        self.emit_shown(shown.0, shown.1);
    }

    /// Toggle viewer visibility without changing the position
    pub fn toggle(&self) {
        let event = {
            let mut state = self.state.lock().expect("state lock poisoned");
            if state.viewer.visible {
                state.viewer.visible = false;
                GalleryEvent::ViewerHidden {
                    timestamp: chrono::Utc::now(),
                }
            } else {
                let url = state
                    .page
                    .as_ref()
                    .and_then(|page| page.image(state.viewer.index))
                    .map(|image| image.view_url.clone());
                let Some(url) = url else {
                    warn!("toggle with no displayable image, ignoring");
                    return;
                };
                state.viewer.visible = true;
                GalleryEvent::ViewerShown {
                    index: state.viewer.index,
                    url,
                    timestamp: chrono::Utc::now(),
                }
            }
        };

        self.events.emit_lossy(event);
    }

    /// Advance the viewer one image forward
    ///
    /// At the last image of the page this delegates to the loader using
    /// the page's "next" link, landing on the first image of the new page;
    /// without such a link it is a no-op.
    pub async fn next(&self) {
        let action = {
            let mut state = self.state.lock().expect("state lock poisoned");
            let Some(page) = state.page.clone() else {
                return;
            };
            match navigator::step_forward(state.viewer.index, page.len()) {
                Step::Within(index) => {
                    state.viewer.index = index;
                    state.viewer.visible = true;
                    match page.image(index) {
                        Some(image) => StepAction::Shown(index, image.view_url.clone()),
                        None => return,
                    }
                }
                Step::AtBoundary(direction) => match page.link(direction) {
                    Some(link) => StepAction::Fetch(LoadRequest::boundary(
                        link.cursor.clone(),
                        InitialPosition::FirstOfPage,
                    )),
                    // No adjacent page: stay where we are
                    None => return,
                },
            }
        };

        self.run_step(action).await;
    }

    /// Retreat the viewer one image backward
    ///
    /// At the first image of the page this delegates to the loader using
    /// the page's "previous" link, landing on the last image of the new
    /// page; without such a link it is a no-op.
    pub async fn previous(&self) {
        let action = {
            let mut state = self.state.lock().expect("state lock poisoned");
            let Some(page) = state.page.clone() else {
                return;
            };
            match navigator::step_backward(state.viewer.index) {
                Step::Within(index) => {
                    state.viewer.index = index;
                    state.viewer.visible = true;
                    match page.image(index) {
                        Some(image) => StepAction::Shown(index, image.view_url.clone()),
                        None => return,
                    }
                }
                Step::AtBoundary(direction) => match page.link(direction) {
                    Some(link) => StepAction::Fetch(LoadRequest::boundary(
                        link.cursor.clone(),
                        InitialPosition::LastOfPage,
                    )),
                    None => return,
                },
            }
        };

        self.run_step(action).await;
    }

    /// Dispose the session
    ///
    /// In-flight loads are discarded and new loads refused, so nothing is
    /// applied after teardown.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        // Invalidate every sequence number handed out so far
        self.issued.fetch_add(1, Ordering::SeqCst);
    }

    /// Image at the current viewer position, derived from the held page at
    /// call time
    pub fn current_image(&self) -> Option<PhotoImage> {
        let state = self.state.lock().expect("state lock poisoned");
        state
            .page
            .as_ref()
            .and_then(|page| page.image(state.viewer.index))
            .cloned()
    }

    /// Full render contract for the grid, navigation-bar and viewer
    /// renderers
    pub fn snapshot(&self) -> GallerySnapshot {
        let state = self.state.lock().expect("state lock poisoned");

        let (images, mut links) = match &state.page {
            Some(page) => (
                page.images().to_vec(),
                page.links().values().cloned().collect::<Vec<_>>(),
            ),
            None => (Vec::new(), Vec::new()),
        };
        links.sort_by(|a, b| a.name.cmp(&b.name));

        let url = state
            .page
            .as_ref()
            .and_then(|page| page.image(state.viewer.index))
            .map(|image| image.view_url.clone());

        GallerySnapshot {
            images,
            links,
            viewer: ViewerSnapshot {
                visible: state.viewer.visible,
                index: state.viewer.index,
                url,
            },
        }
    }

    async fn run_step(&self, action: StepAction) {
        match action {
            StepAction::Shown(index, url) => self.emit_shown(index, url),
            StepAction::Fetch(request) => self.load(request).await,
        }
    }

    fn emit_shown(&self, index: usize, url: String) {
        self.events.emit_lossy(GalleryEvent::ViewerShown {
            index,
            url,
            timestamp: chrono::Utc::now(),
        });
    }

    fn superseded(&self, seq: u64) -> bool {
        self.closed.load(Ordering::SeqCst) || seq != self.issued.load(Ordering::SeqCst)
    }

    /// Make a fetched page the current one and resolve the viewer position
    fn apply_page(&self, seq: u64, page: Page, request: &LoadRequest) {
        let mut emit = Vec::new();
        {
            let mut state = self.state.lock().expect("state lock poisoned");
            // Final supersession check happens under the state lock so two
            // completing loads cannot apply out of order.
            if self.superseded(seq) {
                debug!(seq, "Discarding result of superseded load");
                return;
            }

            let page = Arc::new(page);
            emit.push(GalleryEvent::PageLoaded {
                image_count: page.len(),
                links: page.link_names(),
                timestamp: chrono::Utc::now(),
            });

            match request.position.resolve(page.len()) {
                Some(index) => {
                    state.viewer.index = index;
                    if request.reveal {
                        state.viewer.visible = true;
                    }
                    if state.viewer.visible {
                        if let Some(image) = page.image(index) {
                            emit.push(GalleryEvent::ViewerShown {
                                index,
                                url: image.view_url.clone(),
                                timestamp: chrono::Utc::now(),
                            });
                        }
                    }
                }
                None => {
                    // Empty page: the grid legitimately shows an empty
                    // collection, but the viewer has no image to hold.
                    warn!("Loaded page contains no images");
                    state.viewer.index = 0;
                    if state.viewer.visible {
                        state.viewer.visible = false;
                        emit.push(GalleryEvent::ViewerHidden {
                            timestamp: chrono::Utc::now(),
                        });
                    }
                    emit.push(GalleryEvent::EmptyPage {
                        timestamp: chrono::Utc::now(),
                    });
                }
            }

            state.page = Some(page);
        }

        for event in emit {
            self.events.emit_lossy(event);
        }
    }
}
