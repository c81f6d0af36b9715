// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use equiband_core::bits::{read_bits, write_bits};
use equiband_core::fft::Fft;
use proptest::prelude::*;

proptest! {
    #[test]
    fn bit_packer_round_trips_arbitrary_fields(
        fields in prop::collection::vec((0u32..=0xffff, 1u32..=16), 1..64),
    ) {
        let total_bits: u32 = fields.iter().map(|(_, bits)| bits).sum();
        let byte_len = ((total_bits + 7) / 8) as usize;
        let mut buf = vec![0u8; byte_len + 4]; // padding past the packed region

        let masked: Vec<(u32, u32)> = fields
            .into_iter()
            .map(|(v, bits)| (v & ((1u32 << bits) - 1), bits))
            .collect();

        let mut idx = 0;
        for (v, bits) in &masked {
            idx = write_bits(&mut buf, 0, idx, *v, *bits);
        }

        let mut idx = 0;
        for (v, bits) in &masked {
            let got = read_bits(&buf, 0, idx, *bits);
            prop_assert_eq!(got, *v);
            idx += bits;
        }
    }

    #[test]
    fn fft_round_trip_preserves_signal(samples in prop::collection::vec(-1.0f64..1.0, 1)) {
        // Pad/truncate to a fixed power-of-two size so one Fft plan covers every case.
        let n = 64;
        let mut real = vec![0.0f64; n];
        for (i, s) in samples.iter().take(n).enumerate() {
            real[i] = *s;
        }
        let original = real.clone();
        let mut imag = vec![0.0f64; n];

        let fft = Fft::new(n);
        fft.process(&mut real, &mut imag, false);
        fft.process(&mut real, &mut imag, true);

        for i in 0..n {
            prop_assert!((real[i] - original[i]).abs() < 1e-6);
            prop_assert!(imag[i].abs() < 1e-6);
        }
    }
}
