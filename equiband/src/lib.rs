// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! A perceptually-weighted frequency-domain audio codec for realtime
//! voice transport.
//!
//! Each fixed [`FRAME_SAMPLES`]-sample mono PCM frame at [`SAMPLE_RATE`]
//! Hz is analyzed with a forward FFT ([`equiband_core::fft`]); the
//! low-frequency half of the spectrum is quantized bin-by-bin with a bit
//! allocation drawn from one of four fixed [`Profile`]s, then packed MSB
//! first ([`equiband_core::bits`]) behind a small fixed header. Decoding
//! reverses the process: unpack, rebuild a Hermitian-symmetric spectrum,
//! inverse FFT, emit PCM.
//!
//! This crate performs no I/O and has no notion of a transport — it
//! converts PCM frames to and from opaque encoded-frame byte strings and
//! nothing else. Capture, playback, jitter buffering, and the wire
//! transport itself are the caller's concern.
//!
//! ```
//! use equiband::{decode_frame, Encoder, FRAME_SAMPLES};
//!
//! let samples = [0.0f32; FRAME_SAMPLES];
//! let mut encoder = Encoder::new();
//! let frame = encoder.encode_frame(&samples, "medium").unwrap();
//! let decoded = decode_frame(&frame).unwrap();
//! assert_eq!(decoded.len(), FRAME_SAMPLES);
//! ```

mod error;
mod frame;
mod profile;
mod quantize;

pub use error::{Error, ProfileName, Result};
pub use frame::{decode_frame, encode_frame, frame_size_bytes, Encoder};
pub use profile::{by_id as profile_by_id, by_name as profile_by_name, Profile, PROFILES, PROFILES_BY_ID};

/// PCM samples per encoded frame.
pub const FRAME_SAMPLES: usize = 1024;

/// Samples per second of the mono PCM stream this codec operates on.
pub const SAMPLE_RATE: u32 = 48_000;

/// The FFT size. Equal to [`FRAME_SAMPLES`] — the FFT operates on the
/// whole frame.
pub const FFT_SIZE: usize = 1024;

/// Fixed header size, in bytes, present in every encoded frame.
pub const HEADER_SIZE: usize = 12;

/// Wire-format version written to header byte 0.
pub const VERSION: u8 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_spec() {
        assert_eq!(FRAME_SAMPLES, 1024);
        assert_eq!(SAMPLE_RATE, 48_000);
        assert_eq!(FFT_SIZE, 1024);
        assert_eq!(HEADER_SIZE, 12);
        assert_eq!(VERSION, 2);
    }

    #[test]
    fn profiles_by_id_and_by_name_are_the_same_four_profiles() {
        for p in PROFILES.iter() {
            let by_id = profile_by_id(p.profile_id).unwrap();
            assert_eq!(by_id.name, p.name);
        }
    }
}
