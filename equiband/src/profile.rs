// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The fixed bit-allocation profile table.
//!
//! There are exactly four profiles (`low`, `medium`, `high`, `full`), each
//! an immutable record built once from a piecewise-constant, per-bin
//! weighting curve. See [`PROFILES`] and [`PROFILES_BY_ID`] for the
//! process-wide, lazily-initialized instances.

use once_cell::sync::Lazy;

use crate::{FFT_SIZE, HEADER_SIZE, SAMPLE_RATE};

/// An immutable bit-allocation schedule.
#[derive(Debug, Clone)]
pub struct Profile {
    /// One of `"low"`, `"medium"`, `"high"`, `"full"`.
    pub name: &'static str,
    /// The profile's wire-format selector, in `[0, 3]`. `low` = 0,
    /// `medium` = 1, `high` = 2, `full` = 3.
    pub profile_id: u8,
    /// How many low-frequency bins this profile encodes.
    pub bin_count: usize,
    /// The bit budget for bin `i`, `weights[i] in [1, 16]`.
    pub weights: Vec<u8>,
    /// `2 * sum(weights)` — both real and imaginary parts of each bin are
    /// quantized and packed.
    pub total_bits: u64,
    /// `ceil(total_bits / 8)`.
    pub payload_bytes: usize,
}

impl Profile {
    /// The total encoded frame size for this profile: header plus payload.
    pub fn frame_size_bytes(&self) -> usize {
        HEADER_SIZE + self.payload_bytes
    }

    fn build(name: &'static str, profile_id: u8, bin_count: usize, weight_fn: fn(f64) -> u8) -> Self {
        let weights: Vec<u8> = (0..bin_count)
            .map(|i| {
                let freq = i as f64 * SAMPLE_RATE as f64 / FFT_SIZE as f64;
                weight_fn(freq)
            })
            .collect();

        let total_bits: u64 = 2 * weights.iter().map(|&w| w as u64).sum::<u64>();
        let payload_bytes = total_bits.div_ceil(8) as usize;

        Self { name, profile_id, bin_count, weights, total_bits, payload_bytes }
    }
}

/// Bit weight for a given frequency (Hz) under the `low` profile.
fn weight_low(f: f64) -> u8 {
    weight_from_table(f, [5, 12, 11, 10, 9, 8, 7, 6, 5, 4])
}

/// Bit weight for a given frequency (Hz) under the `medium` profile.
fn weight_medium(f: f64) -> u8 {
    weight_from_table(f, [7, 14, 13, 12, 11, 10, 9, 8, 7, 6])
}

/// Bit weight for a given frequency (Hz) under the `high` profile.
fn weight_high(f: f64) -> u8 {
    weight_from_table(f, [9, 16, 15, 14, 13, 12, 11, 10, 9, 8])
}

/// Bit weight for a given frequency (Hz) under the `full` profile: every
/// bin gets the maximum 16 bits, full bandwidth.
fn weight_full(_f: f64) -> u8 {
    16
}

/// Shared piecewise-constant frequency-band lookup. `table` holds the
/// weight for each of the ten bands in `spec.md` §3's table, in order:
/// `[<50, 50..125, 125..250, 250..500, 500..1000, 1000..3000, 3000..7000,
/// 7000..9000, 9000..13000, >=13000]`.
fn weight_from_table(f: f64, table: [u8; 10]) -> u8 {
    const BAND_EDGES: [f64; 9] = [50.0, 125.0, 250.0, 500.0, 1000.0, 3000.0, 7000.0, 9000.0, 13000.0];

    let band = BAND_EDGES.iter().position(|&edge| f < edge).unwrap_or(BAND_EDGES.len());
    table[band]
}

/// All four profiles, built once, indexed by name.
pub static PROFILES: Lazy<[Profile; 4]> = Lazy::new(|| {
    [
        Profile::build("low", 0, 160, weight_low),
        Profile::build("medium", 1, 256, weight_medium),
        Profile::build("high", 2, 384, weight_high),
        Profile::build("full", 3, 512, weight_full),
    ]
});

/// The same four profiles, indexed by `profile_id`.
///
/// `PROFILES_BY_ID[p.profile_id as usize] == PROFILES[..]` for the
/// corresponding name — both statics are built from the same table, just
/// exposed with the two lookup keys callers need (`spec.md` §8 invariant 6).
pub static PROFILES_BY_ID: Lazy<[Profile; 4]> = Lazy::new(|| PROFILES.clone());

/// Looks up a profile by name.
pub fn by_name(name: &str) -> Option<&'static Profile> {
    PROFILES.iter().find(|p| p.name == name)
}

/// Looks up a profile by `profile_id`, without any fallback.
///
/// Callers implementing the decoder's forward-compatible fallback
/// (`spec.md` §4.1, §9) should use this and fall back to
/// `PROFILES_BY_ID[0]` themselves when it returns `None` — this function
/// does not apply that policy itself, so callers that need strict lookup
/// (e.g. `frame_size_bytes`) aren't forced to opt out of it.
pub fn by_id(profile_id: u8) -> Option<&'static Profile> {
    PROFILES_BY_ID.get(profile_id as usize)
}
