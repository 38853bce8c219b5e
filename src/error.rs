// SPDX-License-Identifier: GPL-3.0-or-later

use std::{borrow::Cow, io};
use thiserror::Error;

/// Enumeration of different error types raised by this crate.
#[derive(Debug, Error)]
pub enum MyError {
    /// Password hashing or verification error.
    #[error("Password hash error: {0}")]
    Hash(
        #[doc(hidden)]
        #[from]
        bcrypt::BcryptError,
    ),

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64(
        #[doc(hidden)]
        #[from]
        base64::DecodeError,
    ),

    /// UTF-8 string conversion error.
    #[error("UTF8 conversion error: {0}")]
    UTF8(
        #[doc(hidden)]
        #[from]
        std::str::Utf8Error,
    ),

    /// Unexpected runtime error.
    #[error("{0}")]
    Runtime(#[doc(hidden)] Cow<'static, str>),

    /// I/O error.
    #[error("I/O error: {0}")]
    IO(
        #[doc(hidden)]
        #[from]
        io::Error,
    ),
}
