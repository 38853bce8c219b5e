// SPDX-License-Identifier: GPL-3.0-or-later

//! The HTTP resources this server exposes.
//!
//! * [health]: `GET /health`, public.
//! * [test]: `GET /test`, protected.
//! * [login]: `POST /auth/login`, protected, and authenticates its body.

pub mod health;
pub mod login;
