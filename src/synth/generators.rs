//! Built-in sound presets
//!
//! Each generator scales its own sum so the peak stays inside [-1, 1]; the
//! encoder clamps anyway, but nothing here relies on it.
//!
//! `static_burst` and `glitch_zap` draw from the supplied RNG and therefore
//! vary run to run unless the caller passes a seeded generator. All other
//! presets ignore the RNG.

use rand::{Rng, RngCore};

use super::oscillator::{
    additive, attack, chirp, exp_decay, partial_headroom, render, sine, white, window,
};

pub(crate) fn chime_classic(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    const PARTIALS: [(f64, f64); 3] = [(1.0, 1.0), (1.5, 0.5), (2.0, 0.25)];
    let scale = 0.8 / partial_headroom(&PARTIALS);

    render(2.0, sample_rate, |t| {
        let env = exp_decay(3.0, t) * attack(t, 0.005);
        scale * env * additive(880.0, &PARTIALS, t)
    })
}

pub(crate) fn bell_soft(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    // (ratio, amplitude, decay rate): inharmonic bell partials
    const PARTIALS: [(f64, f64, f64); 4] = [
        (1.0, 1.0, 1.5),
        (2.76, 0.5, 2.5),
        (5.4, 0.25, 4.0),
        (8.93, 0.125, 6.0),
    ];
    let headroom: f64 = PARTIALS.iter().map(|p| p.1).sum();
    let scale = 0.7 / headroom;

    render(2.5, sample_rate, |t| {
        let sum: f64 = PARTIALS
            .iter()
            .map(|&(ratio, amp, decay)| amp * exp_decay(decay, t) * sine(523.25 * ratio, t))
            .sum();
        scale * attack(t, 0.002) * sum
    })
}

pub(crate) fn beep_double(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    const BEEPS: [f64; 2] = [0.0, 0.25];
    const BEEP_LEN: f64 = 0.15;

    render(2.0, sample_rate, |t| {
        let gate: f64 = BEEPS
            .iter()
            .map(|&start| window(t - start, BEEP_LEN, 0.005, 0.005))
            .sum();
        0.6 * gate * sine(1000.0, t)
    })
}

pub(crate) fn sweep_up(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    render(2.0, sample_rate, |t| {
        0.6 * window(t, 2.0, 0.01, 0.2) * chirp(300.0, 2400.0, 2.0, t)
    })
}

pub(crate) fn sweep_down(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    render(2.0, sample_rate, |t| {
        0.6 * window(t, 2.0, 0.01, 0.2) * chirp(2400.0, 300.0, 2.0, t)
    })
}

pub(crate) fn arpeggio(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    // C major: C5 E5 G5 C6
    const NOTES: [f64; 4] = [523.25, 659.25, 783.99, 1046.5];
    const STEP: f64 = 0.3;
    const PARTIALS: [(f64, f64); 2] = [(1.0, 1.0), (2.0, 0.3)];
    let scale = 0.6 / partial_headroom(&PARTIALS);

    render(2.4, sample_rate, |t| {
        let step = (t / STEP).floor();
        let local = t - step * STEP;
        let freq = NOTES[step as usize % NOTES.len()];
        scale * exp_decay(6.0, local) * attack(local, 0.003) * additive(freq, &PARTIALS, local)
    })
}

pub(crate) fn harmonic_pad(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    let partials: Vec<(f64, f64)> = (1..=6).map(|n| (n as f64, 1.0 / n as f64)).collect();
    let scale = 0.7 / partial_headroom(&partials);

    render(3.0, sample_rate, |t| {
        scale * window(t, 3.0, 0.5, 0.8) * additive(220.0, &partials, t)
    })
}

/// Charging ramp, then a low thump, then a confirmation beep
pub(crate) fn power_up(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    const RAMP_END: f64 = 1.2;
    const THUMP_END: f64 = 1.5;
    const BEEP_START: f64 = 1.6;
    const BEEP_LEN: f64 = 0.4;

    render(2.5, sample_rate, |t| {
        if t < RAMP_END {
            0.5 * (t / RAMP_END) * chirp(200.0, 800.0, RAMP_END, t)
        } else if t < THUMP_END {
            let local = t - RAMP_END;
            0.9 * exp_decay(20.0, local) * sine(60.0, local)
        } else if t >= BEEP_START {
            let local = t - BEEP_START;
            0.5 * window(local, BEEP_LEN, 0.005, 0.05) * sine(1500.0, local)
        } else {
            0.0
        }
    })
}

pub(crate) fn alarm_pulse(sample_rate: u32, _rng: &mut dyn RngCore) -> Vec<f32> {
    // odd harmonics: a softened square
    const PARTIALS: [(f64, f64); 3] = [(1.0, 1.0), (3.0, 1.0 / 3.0), (5.0, 0.2)];
    const PERIOD: f64 = 0.25;
    let scale = 0.6 / partial_headroom(&PARTIALS);

    render(3.0, sample_rate, |t| {
        let local = t % PERIOD;
        scale * window(local, PERIOD / 2.0, 0.004, 0.004) * additive(800.0, &PARTIALS, t)
    })
}

/// Decaying tone with random 50ms bursts of static
pub(crate) fn static_burst(sample_rate: u32, rng: &mut dyn RngCore) -> Vec<f32> {
    const DURATION: f64 = 2.0;
    const SLOT: f64 = 0.05;

    let slots = (DURATION / SLOT).ceil() as usize;
    let active: Vec<bool> = (0..slots).map(|_| rng.gen_bool(0.5)).collect();

    render(DURATION, sample_rate, |t| {
        let tone = 0.3 * exp_decay(0.5, t) * sine(440.0, t);
        let slot = ((t / SLOT) as usize).min(slots - 1);
        if active[slot] {
            tone + 0.4 * white(rng)
        } else {
            tone
        }
    })
}

/// Falling zap with sparse random crackle
pub(crate) fn glitch_zap(sample_rate: u32, rng: &mut dyn RngCore) -> Vec<f32> {
    render(2.0, sample_rate, |t| {
        let zap = 0.5 * window(t, 2.0, 0.005, 0.3) * chirp(1800.0, 200.0, 2.0, t);
        if rng.gen::<f64>() < 0.02 {
            zap + 0.3 * white(rng)
        } else {
            zap
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rms(samples: &[f32]) -> f64 {
        let sum: f64 = samples.iter().map(|&s| (s as f64).powi(2)).sum();
        (sum / samples.len() as f64).sqrt()
    }

    #[test]
    fn test_beep_double_is_silent_between_beeps() {
        let mut rng = StdRng::seed_from_u64(0);
        let samples = beep_double(1000, &mut rng);
        // 0.15s..0.25s is the gap
        assert!(samples[160..250].iter().all(|&s| s == 0.0));
        assert!(samples[1000..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_power_up_phases() {
        let mut rng = StdRng::seed_from_u64(0);
        let rate = 8000;
        let samples = power_up(rate, &mut rng);
        let at = |secs: f64| (secs * rate as f64) as usize;

        // gap between thump and beep
        assert!(samples[at(1.5)..at(1.6)].iter().all(|&s| s == 0.0));
        // every phase makes sound
        assert!(rms(&samples[..at(1.2)]) > 0.05);
        assert!(rms(&samples[at(1.2)..at(1.5)]) > 0.05);
        assert!(rms(&samples[at(1.6)..at(2.0)]) > 0.05);
        // tail after the beep is silent
        assert!(samples[at(2.01)..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_static_burst_depends_on_rng() {
        let a = static_burst(8000, &mut StdRng::seed_from_u64(1));
        let b = static_burst(8000, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_glitch_zap_same_seed_same_output() {
        let a = glitch_zap(8000, &mut StdRng::seed_from_u64(42));
        let b = glitch_zap(8000, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
