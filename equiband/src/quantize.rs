// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-bin symmetric quantization.
//!
//! For a bin quantized with `b` bits, the lattice has `m = (1 << b) - 1`
//! levels, uniformly spaced and symmetric about zero.

/// The maximum representable quantized integer for `bits` bits of
/// allocation: `(1 << bits) - 1`.
pub fn max_level(bits: u8) -> u32 {
    (1u32 << bits) - 1
}

/// Quantizes `x` against `scale` using `bits` bits, per `spec.md` §4.4:
/// clip to `[-scale, scale]`, map to `[0, 1]`, scale to `[0, m]` and round
/// half-away-from-zero, then clamp to `[0, m]`.
///
/// `scale` must be strictly positive (the caller applies the silence
/// guard before calling this).
pub fn quantize(x: f64, scale: f64, bits: u8) -> u32 {
    let m = max_level(bits) as f64;

    let clipped = x.clamp(-scale, scale);
    let normalized = (clipped / scale + 1.0) / 2.0;
    let level = (normalized * m).round();

    level.clamp(0.0, m) as u32
}

/// Inverts [`quantize`]: maps a stored integer `q` back to a floating
/// point value in `[-scale, scale]`.
pub fn dequantize(q: u32, scale: f64, bits: u8) -> f64 {
    let m = max_level(bits) as f64;
    ((q as f64 / m) * 2.0 - 1.0) * scale
}
