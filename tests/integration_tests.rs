//! Integration Tests
//!
//! End-to-end tests for the generate → trim → encode → validate pipeline.

use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_case::test_case;

use clipforge::codec::{decode_wav, encode_wav, encode_wav_default, parse_wav_header};
use clipforge::compliance::{estimate_file_size, validate_for_target, ValidationResult};
use clipforge::dsp::{trim, EffectParameters, TrimEngine, TrimRange};
use clipforge::engine::{resample_buffer, AudioBuffer};
use clipforge::synth::{generate, generate_with_rng, presets};
use clipforge::ClipforgeError;

/// Helper to create a test sine wave buffer
fn create_sine_buffer(frequency: f64, sample_rate: u32, duration_secs: f64) -> AudioBuffer {
    let num_samples = (sample_rate as f64 * duration_secs) as usize;
    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (0.8 * (2.0 * std::f64::consts::PI * frequency * t).sin()) as f32
        })
        .collect();
    AudioBuffer::from_samples(samples, sample_rate).unwrap()
}

// === Generator Tests ===

#[test_case(8000)]
#[test_case(22050)]
#[test_case(44100)]
#[test_case(48000)]
fn test_all_presets_stay_in_range(rate: u32) {
    let mut rng = StdRng::seed_from_u64(1234);
    for preset in presets() {
        let buffer = generate_with_rng(preset.id, rate, &mut rng).unwrap();
        assert!(!buffer.is_empty(), "{} rendered nothing", preset.id);
        for (i, &s) in buffer.samples().iter().enumerate() {
            assert!(
                (-1.0..=1.0).contains(&s),
                "{} at {} Hz: sample {} = {}",
                preset.id,
                rate,
                i,
                s
            );
        }
    }
}

#[test]
fn test_deterministic_presets_reproduce_exactly() {
    for preset in presets().filter(|p| p.deterministic) {
        let a = generate(preset.id, 44100).unwrap();
        let b = generate(preset.id, 44100).unwrap();
        assert!(a == b, "{} is not reproducible", preset.id);
    }
}

#[test]
fn test_noisy_presets_reproduce_with_seed() {
    for preset in presets().filter(|p| !p.deterministic) {
        let a = generate_with_rng(preset.id, 22050, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate_with_rng(preset.id, 22050, &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(a == b, "{} ignores the seed", preset.id);
    }
}

// === Resampler Tests ===

#[test]
fn test_resample_round_trip_unity_is_exact() {
    let buffer = create_sine_buffer(440.0, 44100, 0.5);
    let out = resample_buffer(&buffer, 44100).unwrap();
    assert_eq!(out, buffer);
}

#[test]
fn test_resample_round_trip_error_shrinks_toward_unity() {
    let buffer = create_sine_buffer(440.0, 44100, 0.5);

    let round_trip_error = |rate: u32| {
        let there = resample_buffer(&buffer, rate).unwrap();
        let back = resample_buffer(&there, 44100).unwrap();
        buffer
            .samples()
            .iter()
            .zip(back.samples())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f32, f32::max)
    };

    let far = round_trip_error(16000);
    let near = round_trip_error(40000);
    assert!(near < far, "near {} should beat far {}", near, far);
    assert!(near < 0.05);
}

#[test]
fn test_resample_double_then_halve_is_exact() {
    let buffer = create_sine_buffer(440.0, 22050, 0.25);
    let up = resample_buffer(&buffer, 44100).unwrap();
    let down = resample_buffer(&up, 22050).unwrap();
    assert_eq!(down.len(), buffer.len());
    for (a, b) in buffer.samples().iter().zip(down.samples()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-6);
    }
}

// === Codec Tests ===

#[test]
fn test_wav_round_trip() {
    let buffer = create_sine_buffer(1000.0, 44100, 0.2);
    let bytes = encode_wav_default(&buffer).unwrap();

    let format = parse_wav_header(&bytes).unwrap();
    assert_eq!(format.sample_rate, 44100);
    assert_eq!(format.num_channels, 1);
    assert_eq!(format.bits_per_sample, 16);

    let decoded = decode_wav(&bytes).unwrap();
    assert_eq!(decoded.len(), buffer.len());
    for (orig, dec) in buffer.samples().iter().zip(decoded.samples()) {
        assert!((orig - dec).abs() <= 1.0 / 32768.0);
    }
}

#[test]
fn test_parse_rejects_non_riff() {
    let mut bytes = encode_wav_default(&create_sine_buffer(440.0, 44100, 0.1)).unwrap();
    bytes[0] = b'X';
    assert!(matches!(
        parse_wav_header(&bytes),
        Err(ClipforgeError::Format { .. })
    ));
}

#[test]
fn test_encoder_clamps_overdriven_input() {
    let buffer = AudioBuffer::from_samples(vec![2.0, -2.0, 0.5], 44100).unwrap();
    let decoded = decode_wav(&encode_wav(&buffer, 44100).unwrap()).unwrap();
    assert_eq!(decoded.samples()[0], 1.0);
    assert_eq!(decoded.samples()[1], -1.0);
}

// === Trim Tests ===

#[test]
fn test_full_trim_without_effects_is_identity() {
    let buffer = generate("arpeggio", 44100).unwrap();
    let out = trim(
        &buffer,
        TrimRange::new(0.0, buffer.duration_secs()),
        &EffectParameters::default(),
    )
    .unwrap();
    assert_eq!(out.len(), buffer.len());
    assert!(out == buffer);
}

#[test]
fn test_trim_engine_requires_audio() {
    let mut engine = TrimEngine::new();
    assert!(matches!(
        engine.trim(TrimRange::new(0.0, 1.0), &EffectParameters::default()),
        Err(ClipforgeError::NoAudioLoaded)
    ));

    engine.load(generate("bell-soft", 44100).unwrap());
    let clip = engine
        .trim(TrimRange::new(0.5, 2.5), &EffectParameters::ringtone())
        .unwrap();
    assert_eq!(clip.len(), 88200);
    assert_abs_diff_eq!(clip.peak(), 0.95, epsilon = 1e-5);
}

// === Compliance Tests ===

#[test]
fn test_validation_boundaries() {
    let short = validate_for_target(0.0, 1.9);
    assert!(!short.valid);
    assert!(short.errors[0].contains("1.9") && short.errors[0].contains("short"));

    assert_eq!(validate_for_target(0.0, 2.0), ValidationResult::ok());
    assert_eq!(validate_for_target(0.0, 5.0), ValidationResult::ok());

    let long = validate_for_target(0.0, 5.1);
    assert!(!long.valid);
    assert!(long.errors[0].contains("long"));
}

#[test]
fn test_estimate_file_size_three_seconds() {
    assert_eq!(estimate_file_size(0.0, 3.0), 44 + 44100 * 3 * 2);
    assert_eq!(estimate_file_size(0.0, 3.0), 264_644);
}

#[test]
fn test_estimate_matches_real_encoding() {
    let buffer = generate("harmonic-pad", 44100).unwrap();
    let clip = trim(&buffer, TrimRange::new(0.0, 3.0), &EffectParameters::default()).unwrap();
    let bytes = encode_wav_default(&clip).unwrap();
    assert_eq!(bytes.len() as u64, estimate_file_size(0.0, 3.0));
}

// === Full Pipeline ===

#[test]
fn test_chime_to_wav_end_to_end() {
    let chime = generate("chime-classic", 44100).unwrap();
    let clip = trim(&chime, TrimRange::new(0.0, 1.5), &EffectParameters::default()).unwrap();
    let bytes = encode_wav_default(&clip).unwrap();
    let format = parse_wav_header(&bytes).unwrap();

    assert_eq!(format.audio_format, 1);
    assert_eq!(format.num_channels, 1);
    assert_eq!(format.sample_rate, 44100);
    assert_eq!(format.bits_per_sample, 16);
    assert_abs_diff_eq!(format.duration_secs(), 1.5, epsilon = 1.0 / 44100.0);
}

#[test]
fn test_foreign_rate_source_exports_at_device_rate() {
    let source = create_sine_buffer(440.0, 48000, 3.0);
    let clip = trim(
        &source,
        TrimRange::new(0.5, 2.75),
        &EffectParameters::declick(),
    )
    .unwrap();
    let bytes = encode_wav_default(&clip).unwrap();
    let format = parse_wav_header(&bytes).unwrap();

    assert_eq!(format.sample_rate, 44100);
    assert_abs_diff_eq!(format.duration_secs(), 2.25, epsilon = 1.0 / 44100.0);
    assert!(validate_for_target(0.5, 2.75).valid);
}
