// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Encodes and decodes a single sine-wave frame under each profile,
//! printing the resulting wire size and round-trip error. Run with
//! `RUST_LOG=trace cargo run --example roundtrip_demo -p equiband` to see
//! the codec's own `log::trace!` output.

use std::f32::consts::PI;

use equiband::{decode_frame, Encoder, FRAME_SAMPLES, SAMPLE_RATE};

fn sine_frame(freq_hz: f32) -> [f32; FRAME_SAMPLES] {
    let mut frame = [0.0f32; FRAME_SAMPLES];
    for (n, s) in frame.iter_mut().enumerate() {
        *s = (2.0 * PI * freq_hz * n as f32 / SAMPLE_RATE as f32).sin();
    }
    frame
}

fn main() {
    env_logger::init();

    let input = sine_frame(440.0);
    let mut encoder = Encoder::new();

    for profile in ["low", "medium", "high", "full"] {
        let frame = encoder.encode_frame(&input, profile).expect("encode");
        let decoded = decode_frame(&frame).expect("decode");

        let max_err =
            input.iter().zip(decoded.iter()).map(|(a, b)| (a - b).abs()).fold(0.0f32, f32::max);

        println!("{profile:>6}: {} bytes, max abs error {max_err:.5}", frame.len());
    }
}
