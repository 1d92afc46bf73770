//! Closed-form oscillator and envelope primitives
//!
//! Everything is a pure function of elapsed time `t` in seconds, so a preset
//! is just a formula evaluated once per sample.

use std::f64::consts::TAU;

use rand::{Rng, RngCore};

/// Sine at `freq` Hz
#[inline]
pub fn sine(freq: f64, t: f64) -> f64 {
    (TAU * freq * t).sin()
}

/// Exponential decay `e^(-rate*t)`
#[inline]
pub fn exp_decay(rate: f64, t: f64) -> f64 {
    (-rate * t).exp()
}

/// Linear 0→1 ramp reaching 1 after `attack` seconds
#[inline]
pub fn attack(t: f64, attack: f64) -> f64 {
    if attack <= 0.0 {
        1.0
    } else {
        (t / attack).clamp(0.0, 1.0)
    }
}

/// Trapezoid window over `[0, length]` with linear attack and release
///
/// Zero outside the window.
pub fn window(t: f64, length: f64, attack_secs: f64, release_secs: f64) -> f64 {
    if !(0.0..=length).contains(&t) {
        return 0.0;
    }
    let rise = attack(t, attack_secs);
    let fall = attack(length - t, release_secs);
    rise.min(fall)
}

/// Linear frequency sweep from `f0` to `f1` over `duration` seconds
///
/// Phase is the integral of the instantaneous frequency, so there are no
/// discontinuities as the pitch moves.
#[inline]
pub fn chirp(f0: f64, f1: f64, duration: f64, t: f64) -> f64 {
    let k = (f1 - f0) / duration;
    (TAU * (f0 * t + 0.5 * k * t * t)).sin()
}

/// Sum of sine partials `(frequency ratio, amplitude)` over a base frequency
pub fn additive(base: f64, partials: &[(f64, f64)], t: f64) -> f64 {
    partials
        .iter()
        .map(|&(ratio, amp)| amp * sine(base * ratio, t))
        .sum()
}

/// Sum of the absolute partial amplitudes, the worst-case peak of [`additive`]
pub fn partial_headroom(partials: &[(f64, f64)]) -> f64 {
    partials.iter().map(|&(_, amp)| amp.abs()).sum()
}

/// Uniform white noise in [-1, 1)
#[inline]
pub fn white(rng: &mut dyn RngCore) -> f64 {
    rng.gen_range(-1.0..1.0)
}

/// Evaluate `f(t)` for every sample of a `duration`-second clip
pub fn render(duration: f64, sample_rate: u32, mut f: impl FnMut(f64) -> f64) -> Vec<f32> {
    let rate = sample_rate as f64;
    let num_samples = (duration * rate).round() as usize;
    (0..num_samples)
        .map(|i| f(i as f64 / rate) as f32)
        .collect()
}
