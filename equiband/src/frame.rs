// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame encoding and decoding: the wire format described in `spec.md` §3.

use equiband_core::bits::{read_bits, write_bits};
use equiband_core::fft::Fft;

use crate::error::{Error, ProfileName, Result};
use crate::profile::{self, Profile, PROFILES_BY_ID};
use crate::quantize::{dequantize, quantize};
use crate::{FFT_SIZE, FRAME_SAMPLES, HEADER_SIZE, VERSION};

/// Floor applied to the per-frame scale so a silent frame still produces a
/// strictly positive divisor (`spec.md` §4.5 step 4, §9 "silence guard").
const SILENCE_FLOOR: f64 = 1e-9;

/// Per-encoder-instance state: the monotonic sequence counter written
/// into each encoded frame's header.
///
/// `spec.md` §5/§9 recommend per-instance rather than shared mutable
/// state, so that independent encoder instances (e.g. one per producer
/// thread) don't observe each other's sequence numbers. If an `Encoder`
/// must be shared across threads, callers are responsible for
/// synchronizing calls to [`Encoder::encode_frame`] themselves (e.g. behind
/// a `Mutex`) — this type does not do so internally.
#[derive(Debug, Default)]
pub struct Encoder {
    sequence: u32,
}

impl Encoder {
    /// Creates a new encoder with its sequence counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new encoder whose first frame will carry `start` as its
    /// sequence number — useful for resuming a stream across a
    /// reconnect, or for deterministic tests.
    pub fn starting_at(start: u32) -> Self {
        Self { sequence: start }
    }

    /// The sequence number that will be written into the *next* frame
    /// this encoder produces.
    pub fn next_sequence(&self) -> u32 {
        self.sequence
    }

    /// Encodes one PCM frame under the named profile, advancing this
    /// encoder's sequence counter by one (wrapping at 2^32).
    ///
    /// See [`encode_frame`] for the wire format produced.
    pub fn encode_frame(&mut self, samples: &[f32], profile_name: &str) -> Result<Vec<u8>> {
        encode_frame(samples, profile_name, self)
    }
}

/// Encodes one PCM frame of exactly [`FRAME_SAMPLES`] samples under the
/// named profile, using and advancing `encoder`'s sequence counter.
///
/// Fails with [`Error::UnknownProfile`] if `profile_name` is not one of
/// `"low"`, `"medium"`, `"high"`, `"full"`, or [`Error::BadFrameLength`]
/// if `samples.len() != FRAME_SAMPLES`.
pub fn encode_frame(samples: &[f32], profile_name: &str, encoder: &mut Encoder) -> Result<Vec<u8>> {
    let profile =
        profile::by_name(profile_name).ok_or_else(|| Error::UnknownProfile(ProfileName(profile_name.to_owned())))?;

    if samples.len() != FRAME_SAMPLES {
        return Err(Error::BadFrameLength { expected: FRAME_SAMPLES, actual: samples.len() });
    }

    let mut real: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
    let mut imag = vec![0.0f64; FFT_SIZE];

    let fft = Fft::new(FFT_SIZE);
    fft.process(&mut real, &mut imag, false);

    let max_abs = (0..profile.bin_count)
        .map(|i| real[i].abs().max(imag[i].abs()))
        .fold(0.0_f64, f64::max)
        .max(SILENCE_FLOOR);

    let mut frame = vec![0u8; profile.frame_size_bytes()];
    frame[0] = VERSION;
    frame[1] = (profile.bin_count & 0xff) as u8;
    frame[2] = profile.profile_id;
    // frame[3] is reserved and left zero.
    frame[4..8].copy_from_slice(&(max_abs as f32).to_le_bytes());

    let sequence = encoder.sequence;
    frame[8..12].copy_from_slice(&sequence.to_le_bytes());
    encoder.sequence = encoder.sequence.wrapping_add(1);
    if encoder.sequence == 0 {
        log::debug!("equiband encoder sequence counter wrapped around to 0");
    }

    let mut bit_index = 0u32;
    for i in 0..profile.bin_count {
        let bits = profile.weights[i];
        let q_re = quantize(real[i], max_abs, bits);
        let q_im = quantize(imag[i], max_abs, bits);
        bit_index = write_bits(&mut frame, HEADER_SIZE, bit_index, q_re, bits as u32);
        bit_index = write_bits(&mut frame, HEADER_SIZE, bit_index, q_im, bits as u32);
    }

    log::trace!(
        "equiband encoded frame: profile={} bins={} scale={:.6e} seq={}",
        profile.name,
        profile.bin_count,
        max_abs,
        sequence
    );

    Ok(frame)
}

/// Decodes an encoded frame into [`FRAME_SAMPLES`] PCM samples.
///
/// Fails with [`Error::TooSmall`] if `bytes` is shorter than
/// [`HEADER_SIZE`], or [`Error::UnsupportedVersion`] if the header's
/// version byte does not match [`VERSION`].
///
/// An unrecognized `profileId` does *not* fail: per `spec.md` §4.1/§9,
/// decoding falls back to profile 0 (`low`) so a newer encoder talking to
/// an older decoder degrades gracefully instead of dropping the stream. A
/// `log::warn!` is emitted when this happens.
pub fn decode_frame(bytes: &[u8]) -> Result<[f32; FRAME_SAMPLES]> {
    if bytes.len() < HEADER_SIZE {
        return Err(Error::TooSmall { min: HEADER_SIZE, actual: bytes.len() });
    }

    let version = bytes[0];
    if version != VERSION {
        return Err(Error::UnsupportedVersion { expected: VERSION, found: version });
    }

    let profile_id = bytes[2];
    let profile: &Profile = match profile::by_id(profile_id) {
        Some(p) => p,
        None => {
            log::warn!("equiband: unknown profile id {profile_id}, falling back to profile 0 (low)");
            &PROFILES_BY_ID[0]
        }
    };

    let scale = f32::from_le_bytes(bytes[4..8].try_into().expect("4-byte slice")) as f64;

    let mut real = vec![0.0f64; FFT_SIZE];
    let mut imag = vec![0.0f64; FFT_SIZE];

    let mut bit_index = 0u32;
    for i in 0..profile.bin_count {
        let bits = profile.weights[i];
        let q_re = read_bits(bytes, HEADER_SIZE, bit_index, bits as u32);
        bit_index += bits as u32;
        let q_im = read_bits(bytes, HEADER_SIZE, bit_index, bits as u32);
        bit_index += bits as u32;

        let r = dequantize(q_re, scale, bits);
        let im = dequantize(q_im, scale, bits);

        real[i] = r;
        imag[i] = im;

        if i != 0 {
            real[FFT_SIZE - i] = r;
            imag[FFT_SIZE - i] = -im;
        }
    }

    let fft = Fft::new(FFT_SIZE);
    fft.process(&mut real, &mut imag, true);

    log::trace!("equiband decoded frame: profile={} bins={} scale={:.6e}", profile.name, profile.bin_count, scale);

    let mut out = [0.0f32; FRAME_SAMPLES];
    for (o, r) in out.iter_mut().zip(real.iter()) {
        *o = *r as f32;
    }
    Ok(out)
}

/// Returns the total encoded size in bytes (header plus payload) for the
/// named profile.
///
/// Fails with [`Error::UnknownProfile`] if `profile_name` is not one of
/// `"low"`, `"medium"`, `"high"`, `"full"`.
pub fn frame_size_bytes(profile_name: &str) -> Result<usize> {
    profile::by_name(profile_name)
        .map(Profile::frame_size_bytes)
        .ok_or_else(|| Error::UnknownProfile(ProfileName(profile_name.to_owned())))
}
