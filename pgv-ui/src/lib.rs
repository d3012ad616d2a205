//! pgv-ui library - paginated gallery browsing component
//!
//! The two cooperating halves of the gallery core: a page loader fetching
//! one page of image metadata at a time from a cursor-paginated photo
//! service, and a viewer navigator stepping through the loaded page and
//! delegating back to the loader at the page edges. Renderers (grid,
//! navigation bar, viewer overlay) attach via the event bus and the session
//! snapshot.

pub mod filter;
pub mod loader;
pub mod navigator;
pub mod page;
pub mod session;

pub use filter::GalleryFilter;
pub use loader::PageLoader;
pub use page::{InitialPosition, LinkDirection, Page};
pub use session::{GallerySession, LoadRequest};
