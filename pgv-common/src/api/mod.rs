//! Wire-format types of the photo service API

pub mod types;

pub use types::{LinkResource, PageResponse, PhotoResource, PhotoResourceLinks};
