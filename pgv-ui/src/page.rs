//! Domain model of one fetched gallery page
//!
//! A page is one batch of images plus its named navigation links. Only one
//! page is held at a time; a newly fetched page fully replaces the old one.

use pgv_common::api::PageResponse;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Direction of a page-boundary crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    /// Towards the next page
    Forward,
    /// Towards the previous page
    Backward,
}

impl LinkDirection {
    /// Link name used by the photo service for this direction
    ///
    /// The single place where the wire-level link names appear; the
    /// navigator only ever deals in directions.
    pub fn link_name(self) -> &'static str {
        match self {
            LinkDirection::Forward => "next",
            LinkDirection::Backward => "previous",
        }
    }
}

/// Initial viewer position on a freshly loaded page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialPosition {
    /// Land on the first image
    FirstOfPage,
    /// Land on the last image (arriving from a step backward across a page
    /// boundary)
    LastOfPage,
    /// Land on an explicit index
    At(usize),
}

impl InitialPosition {
    /// Resolve to a concrete index within a page of `len` images
    ///
    /// Returns `None` for an empty page. An explicit index beyond the end
    /// is clamped to the last image.
    pub fn resolve(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match self {
            InitialPosition::FirstOfPage => 0,
            InitialPosition::LastOfPage => len - 1,
            InitialPosition::At(index) if index < len => index,
            InitialPosition::At(index) => {
                warn!(index, len, "Requested position beyond page end, landing on last image");
                len - 1
            }
        })
    }
}

/// One displayable image of the current page
///
/// Identity is positional within the page; images are not tracked across
/// pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoImage {
    /// Opaque identifier from the service
    pub id: String,
    /// Absolute URL of the full-size view
    pub view_url: String,
    /// Absolute URL of the thumbnail, when the service provides one
    pub thumb_url: Option<String>,
}

/// Named pagination link of the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// Link name, e.g. "next"
    pub name: String,
    /// Opaque cursor token, echoed back verbatim on the follow-up request
    pub cursor: String,
}

/// One fetched batch of images plus its navigation links
#[derive(Debug, Clone)]
pub struct Page {
    images: Vec<PhotoImage>,
    links: HashMap<String, PageLink>,
}

impl Page {
    /// Build a page from a wire response
    ///
    /// Image hrefs are path fragments and become absolute here; cursor
    /// tokens stay untouched. The link array is keyed by name for O(1)
    /// lookup.
    pub fn from_response(response: PageResponse, base_url: &str) -> Self {
        let images = response
            .data
            .into_iter()
            .map(|photo| PhotoImage {
                view_url: format!("{}{}", base_url, photo.links.view),
                thumb_url: photo.links.thumb.map(|t| format!("{}{}", base_url, t)),
                id: photo.id,
            })
            .collect();

        let links = response
            .links
            .unwrap_or_default()
            .into_iter()
            .map(|l| {
                (
                    l.name.clone(),
                    PageLink {
                        name: l.name,
                        cursor: l.href,
                    },
                )
            })
            .collect();

        Self { images, links }
    }

    /// Number of images on this page
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether this page carries no images
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image at `index`, if within bounds
    pub fn image(&self, index: usize) -> Option<&PhotoImage> {
        self.images.get(index)
    }

    /// All images in display order
    pub fn images(&self) -> &[PhotoImage] {
        &self.images
    }

    /// Navigation link towards `direction`, if the service offered one
    pub fn link(&self, direction: LinkDirection) -> Option<&PageLink> {
        self.links.get(direction.link_name())
    }

    /// All navigation links of this page
    pub fn links(&self) -> &HashMap<String, PageLink> {
        &self.links
    }

    /// Sorted link names, for event payloads and rendering
    pub fn link_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.links.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgv_common::api::{LinkResource, PhotoResource, PhotoResourceLinks};

    fn response(ids: &[&str], links: Option<Vec<LinkResource>>) -> PageResponse {
        PageResponse {
            data: ids
                .iter()
                .map(|id| PhotoResource {
                    id: id.to_string(),
                    name: None,
                    date_time: None,
                    links: PhotoResourceLinks {
                        view: format!("/photos/{}/view", id),
                        thumb: Some(format!("/photos/{}/thumb", id)),
                    },
                })
                .collect(),
            links,
        }
    }

    #[test]
    fn test_from_response_absolutizes_image_urls() {
        let page = Page::from_response(response(&["p1"], None), "http://gallery.local:8080");

        let image = page.image(0).expect("image should exist");
        assert_eq!(image.id, "p1");
        assert_eq!(image.view_url, "http://gallery.local:8080/photos/p1/view");
        assert_eq!(
            image.thumb_url.as_deref(),
            Some("http://gallery.local:8080/photos/p1/thumb")
        );
    }

    #[test]
    fn test_from_response_keeps_cursor_verbatim() {
        let links = vec![LinkResource {
            name: "next".to_string(),
            href: "opaque-token-2".to_string(),
        }];
        let page = Page::from_response(response(&["p1"], Some(links)), "http://gallery.local");

        let link = page.link(LinkDirection::Forward).expect("link should exist");
        assert_eq!(link.cursor, "opaque-token-2");
    }

    #[test]
    fn test_missing_links_yield_empty_mapping() {
        let page = Page::from_response(response(&["p1"], None), "http://gallery.local");

        assert!(page.links().is_empty());
        assert!(page.link(LinkDirection::Forward).is_none());
        assert!(page.link(LinkDirection::Backward).is_none());
    }

    #[test]
    fn test_link_direction_table() {
        assert_eq!(LinkDirection::Forward.link_name(), "next");
        assert_eq!(LinkDirection::Backward.link_name(), "previous");
    }

    #[test]
    fn test_link_names_sorted() {
        let links = vec![
            LinkResource {
                name: "previous".to_string(),
                href: "p1".to_string(),
            },
            LinkResource {
                name: "next".to_string(),
                href: "p3".to_string(),
            },
        ];
        let page = Page::from_response(response(&["x"], Some(links)), "http://g");

        assert_eq!(page.link_names(), vec!["next".to_string(), "previous".to_string()]);
    }

    #[test]
    fn test_initial_position_first() {
        assert_eq!(InitialPosition::FirstOfPage.resolve(3), Some(0));
    }

    #[test]
    fn test_initial_position_last() {
        assert_eq!(InitialPosition::LastOfPage.resolve(3), Some(2));
        assert_eq!(InitialPosition::LastOfPage.resolve(1), Some(0));
    }

    #[test]
    fn test_initial_position_explicit() {
        assert_eq!(InitialPosition::At(1).resolve(3), Some(1));
        assert_eq!(InitialPosition::At(0).resolve(3), Some(0));
    }

    #[test]
    fn test_initial_position_clamps_out_of_range() {
        assert_eq!(InitialPosition::At(9).resolve(3), Some(2));
    }

    #[test]
    fn test_initial_position_empty_page() {
        assert_eq!(InitialPosition::FirstOfPage.resolve(0), None);
        assert_eq!(InitialPosition::LastOfPage.resolve(0), None);
        assert_eq!(InitialPosition::At(0).resolve(0), None);
    }
}
