// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Codec-agnostic DSP and bitstream primitives.
//!
//! This crate has no notion of "profile", "frame", or any other concept
//! specific to the `equiband` wire format. It provides the two building
//! blocks a frequency-domain codec is built from: a radix-2 FFT ([`fft`])
//! and an MSB-first bit packer/unpacker ([`bits`]).

pub mod bits;
pub mod fft;
