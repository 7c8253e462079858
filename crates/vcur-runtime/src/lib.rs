#![forbid(unsafe_code)]

//! Runtime: the controller between the host editor and the flash pipeline.
//!
//! # Role in Visible Cursor
//! `vcur-runtime` is the only crate that sees both sides: host events come
//! in (scroll offsets, view changes, pointer activity, cursor jumps), the
//! scheduler decides, and on admission the controller queries geometry,
//! resolves a color, and paints through the host's painter capability.
//!
//! # How it fits in the system
//! The host glue is expected to be thin: translate each editor event into
//! one [`Controller`] call with the current instant, call
//! [`Controller::tick`] from its frame or timer loop, and call
//! [`Controller::teardown`] on unload. Everything stateful lives below this
//! crate and is deterministic under test.

pub mod controller;

pub use controller::{Controller, SurfaceId};
