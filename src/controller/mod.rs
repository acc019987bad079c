//! Owners of mutable application state.
//!
//! - [`fetch`]: authoritative remote lists (zones, cameras) plus polling
//! - [`view`] : viewport, selection and filter state
//!
//! Each piece of state has exactly one owner; other modules go through the
//! owner's entry points.

pub mod fetch;
pub mod view;

pub use fetch::{
    CameraLoader, FetchController, FetchOutcome, FetchState, LoadStatus, Loader, PollHandle,
    ZoneLoader,
};
pub use view::{Selection, ViewController};
