// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Errors raised by [`crate::encode_frame`], [`crate::decode_frame`], and
/// [`crate::frame_size_bytes`].
///
/// An unknown `profileId` encountered *during decode* is deliberately not
/// an error — see the module documentation for the forward-compatible
/// fallback policy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `encode_frame` or `frame_size_bytes` was given a profile name that
    /// is not one of `"low"`, `"medium"`, `"high"`, or `"full"`.
    #[error("unknown profile {0:?}, expected one of \"low\", \"medium\", \"high\", \"full\"")]
    UnknownProfile(ProfileName),

    /// `encode_frame` was given a sample slice whose length does not equal
    /// [`crate::FRAME_SAMPLES`].
    #[error("bad frame length: expected {expected} samples, got {actual}")]
    BadFrameLength {
        /// The required length, [`crate::FRAME_SAMPLES`].
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// `decode_frame` was given a buffer shorter than [`crate::HEADER_SIZE`].
    #[error("encoded frame too small: need at least {min} bytes, got {actual}")]
    TooSmall {
        /// [`crate::HEADER_SIZE`].
        min: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// `decode_frame` was given a buffer whose header byte 0 does not
    /// equal [`crate::VERSION`].
    #[error("unsupported wire format version {found}, expected {expected}")]
    UnsupportedVersion {
        /// [`crate::VERSION`].
        expected: u8,
        /// The version byte actually found.
        found: u8,
    },
}

/// A profile name, boxed as an owned string so [`Error::UnknownProfile`]
/// does not borrow from the caller's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileName(pub String);

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
