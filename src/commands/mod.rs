//! Entry points over [`AppState`](crate::state::AppState).
//!
//! Sub-modules are grouped by concern:
//! - [`map`]   : selection, viewport, filters, event dispatch, frame building
//! - [`data`]  : manual refresh and list queries
//! - [`status`]: status bar summary
//!
//! Every function takes the state by reference, so each one can be driven
//! from tests without a map surface.

pub mod data;
pub mod map;
pub mod status;
