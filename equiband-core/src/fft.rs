// Equiband
// Copyright (c) 2024 The Equiband Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An in-place radix-2 decimation-in-time Cooley-Tukey FFT.
//!
//! Unlike an FFT built around an interleaved `Complex` slice, this one
//! operates on two parallel `f64` buffers (real, imaginary) of equal
//! length, matching the layout a quantizer that treats real and imaginary
//! parts as independent scalar lanes wants to consume directly.

use std::f64::consts::PI;

/// A reusable radix-2 FFT over a fixed size `n`.
///
/// Construction precomputes the bit-reversal permutation table once; the
/// same `Fft` can then be used to transform many buffers of that size
/// without repeating that work.
pub struct Fft {
    /// `perm[i]` is the bit-reversal of `i` across `log2(size)` bits.
    perm: Box<[u32]>,
    size: usize,
}

impl Fft {
    /// Builds an FFT plan for transforms of length `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a power of two. This is a one-time,
    /// construction-time check; `n` is expected to be a compile-time
    /// constant in practice (`equiband` always builds this with
    /// `FFT_SIZE`), so a panic here indicates a programmer error rather
    /// than a runtime condition callers need to recover from.
    pub fn new(n: usize) -> Self {
        assert!(n.is_power_of_two(), "fft size must be a power of two, got {n}");

        let log2n = n.trailing_zeros();
        let perm = (0..n as u32).map(|i| i.reverse_bits() >> (u32::BITS - log2n)).collect();

        Self { perm, size: n }
    }

    /// The transform length this plan was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Transforms `real`/`imag` in place.
    ///
    /// When `invert` is `false`, performs the forward transform. When
    /// `invert` is `true`, performs the inverse transform, including the
    /// `1/n` normalization.
    ///
    /// # Panics
    ///
    /// Panics if either buffer's length does not equal [`Fft::size`].
    /// Mismatched buffer lengths are a programmer error, not a condition
    /// that can arise from untrusted input.
    pub fn process(&self, real: &mut [f64], imag: &mut [f64], invert: bool) {
        let n = self.size;
        assert_eq!(real.len(), n, "real buffer length must equal fft size");
        assert_eq!(imag.len(), n, "imaginary buffer length must equal fft size");

        // Bit-reversal permutation, using the precomputed table.
        for i in 0..n {
            let j = self.perm[i] as usize;
            if i < j {
                real.swap(i, j);
                imag.swap(i, j);
            }
        }

        // Butterflies: for each stage, `len` doubles from 2 up to `n`.
        let mut len = 2;
        while len <= n {
            let half = len / 2;
            let theta = if invert { -2.0 * PI / len as f64 } else { 2.0 * PI / len as f64 };
            let step_re = theta.cos();
            let step_im = theta.sin();

            let mut base = 0;
            while base < n {
                let mut w_re = 1.0_f64;
                let mut w_im = 0.0_f64;

                for k in 0..half {
                    let i0 = base + k;
                    let i1 = i0 + half;

                    let t_re = real[i1] * w_re - imag[i1] * w_im;
                    let t_im = real[i1] * w_im + imag[i1] * w_re;

                    let u_re = real[i0];
                    let u_im = imag[i0];

                    real[i0] = u_re + t_re;
                    imag[i0] = u_im + t_im;
                    real[i1] = u_re - t_re;
                    imag[i1] = u_im - t_im;

                    // Advance the twiddle factor by complex multiplication
                    // rather than calling cos/sin again.
                    let next_re = w_re * step_re - w_im * step_im;
                    let next_im = w_re * step_im + w_im * step_re;
                    w_re = next_re;
                    w_im = next_im;
                }

                base += len;
            }

            len <<= 1;
        }

        if invert {
            let scale = 1.0 / n as f64;
            for (re, im) in real.iter_mut().zip(imag.iter_mut()) {
                *re *= scale;
                *im *= scale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct O(n^2) summation using the same sign convention as
    /// [`Fft::process`]: the `invert=false` transform multiplies by
    /// `exp(+i*2*pi*k*t/n)`, the `invert=true` transform by
    /// `exp(-i*2*pi*k*t/n)` followed by `1/n` normalization.
    fn naive_dft(real: &[f64], imag: &[f64], invert: bool) -> (Vec<f64>, Vec<f64>) {
        let n = real.len();
        let sign = if invert { -1.0 } else { 1.0 };
        let mut out_re = vec![0.0; n];
        let mut out_im = vec![0.0; n];

        for k in 0..n {
            let mut acc_re = 0.0;
            let mut acc_im = 0.0;
            for t in 0..n {
                let angle = sign * 2.0 * PI * (k * t) as f64 / n as f64;
                let (c, s) = (angle.cos(), angle.sin());
                acc_re += real[t] * c - imag[t] * s;
                acc_im += real[t] * s + imag[t] * c;
            }
            out_re[k] = acc_re;
            out_im[k] = acc_im;
        }

        if invert {
            for v in out_re.iter_mut().chain(out_im.iter_mut()) {
                *v /= n as f64;
            }
        }

        (out_re, out_im)
    }

    #[test]
    fn matches_naive_dft_forward() {
        let n = 16;
        let fft = Fft::new(n);
        let mut real: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
        let mut imag = vec![0.0; n];

        let (want_re, want_im) = naive_dft(&real, &imag, false);
        fft.process(&mut real, &mut imag, false);

        for i in 0..n {
            assert!((real[i] - want_re[i]).abs() < 1e-9, "re[{i}]");
            assert!((imag[i] - want_im[i]).abs() < 1e-9, "im[{i}]");
        }
    }

    #[test]
    fn round_trips_random_signal() {
        let n = 1024;
        let fft = Fft::new(n);
        let original: Vec<f64> = (0..n).map(|i| ((i * 2654435761u32 as usize) % 2000) as f64 / 1000.0 - 1.0).collect();

        let mut real = original.clone();
        let mut imag = vec![0.0; n];

        fft.process(&mut real, &mut imag, false);
        fft.process(&mut real, &mut imag, true);

        for i in 0..n {
            assert!((real[i] - original[i]).abs() < 1e-6, "re[{i}] drifted");
            assert!(imag[i].abs() < 1e-6, "im[{i}] should return to ~0");
        }
    }

    #[test]
    fn sine_wave_energy_concentrates_in_expected_bin() {
        let n = 1024;
        let fft = Fft::new(n);
        let bin = 10;
        let mut real: Vec<f64> =
            (0..n).map(|i| (2.0 * PI * bin as f64 * i as f64 / n as f64).sin()).collect();
        let mut imag = vec![0.0; n];

        fft.process(&mut real, &mut imag, false);

        let mag = |k: usize| (real[k] * real[k] + imag[k] * imag[k]).sqrt();

        let peak_mag = mag(bin).max(mag(n - bin));
        for k in 1..n / 2 {
            if k != bin {
                assert!(mag(k) < peak_mag * 0.05, "unexpected energy at bin {k}: {}", mag(k));
            }
        }
    }

    #[test]
    #[should_panic]
    fn rejects_non_power_of_two_size() {
        Fft::new(100);
    }

    #[test]
    #[should_panic]
    fn rejects_mismatched_buffer_length() {
        let fft = Fft::new(8);
        let mut real = vec![0.0; 8];
        let mut imag = vec![0.0; 4];
        fft.process(&mut real, &mut imag, false);
    }
}
