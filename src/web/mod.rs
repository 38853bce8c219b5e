// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(missing_docs)]

//! The Rocket server: resources, the access gate composed in front of them,
//! and the catchers + fairings wrapping everything.

mod gate;
pub mod resources;
mod server;
mod stop_watch;

pub use gate::{Principal, WWW_AUTHENTICATE_HDR};
pub use server::build;
pub use stop_watch::STOP_WATCH_HDR;
