//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::ExportArgs;
use crate::codec::{encode_wav, parse_wav_header};
use crate::compliance::DeviceConstraints;
use crate::dsp::{EffectParameters, TrimRange};
use crate::engine::io::{import_wav, ByteSink, FileSink};
use crate::engine::AudioBuffer;
use crate::error::Result;
use crate::pipeline::{ExportPipeline, ExportReport};
use crate::synth::{self, DEFAULT_PRESET_ID};

/// List built-in presets.
pub fn list_presets(json: bool) -> Result<()> {
    let presets: Vec<_> = synth::presets().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    println!("{:<16} {:<18} {:<8} {:>6}  {}", "ID", "NAME", "TYPE", "SECS", "NOTES");
    println!("{:-<60}", "");
    for preset in presets {
        println!(
            "{:<16} {:<18} {:<8} {:>6.1}  {}",
            preset.id,
            preset.name,
            preset.category.as_str(),
            preset.duration_secs,
            if preset.deterministic { "" } else { "varies per run" }
        );
    }
    Ok(())
}

/// Render a preset to a WAV file.
pub fn generate(preset: &str, output: &Path, rate: u32, seed: Option<u64>) -> Result<()> {
    info!("Generating '{}' at {} Hz", preset, rate);

    let buffer = render_preset(preset, rate, seed)?;
    let bytes = encode_wav(&buffer, rate)?;
    FileSink::new(output).accept(&bytes, crate::codec::WAV_MIME_TYPE)?;

    println!(
        "Generated {:.2}s ({} bytes): {}",
        buffer.duration_secs(),
        bytes.len(),
        output.display()
    );
    Ok(())
}

/// Trim, shape and export a clip, printing the JSON report.
pub fn export(args: &ExportArgs) -> Result<ExportReport> {
    let constraints = load_constraints(args.constraints.as_deref())?;
    let effects = effects_from_args(args)?;

    let source = match &args.input {
        Some(path) => import_wav(path)?,
        None => {
            let preset = args.preset.as_deref().unwrap_or(DEFAULT_PRESET_ID);
            render_preset(preset, constraints.sample_rate, args.seed)?
        }
    };

    let range = TrimRange::new(args.start, args.end.unwrap_or_else(|| source.duration_secs()));
    info!("Exporting {:.3}s..{:.3}s to {}", range.start, range.end, args.output.display());

    let pipeline = ExportPipeline::new(constraints, effects);
    let mut sink = FileSink::new(&args.output);
    let report = pipeline.export(&source, range, &mut sink)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report)
}

/// Check a range against the device rules.
pub fn validate(start: f64, end: f64, constraints: Option<&Path>) -> Result<()> {
    let constraints = load_constraints(constraints)?;
    let result = constraints.validate(start, end);

    println!("{}", serde_json::to_string_pretty(&result)?);
    println!(
        "Estimated size: {} bytes",
        constraints.estimate_file_size(start, end)
    );
    Ok(())
}

/// Print the header of a canonical WAV file.
pub fn info(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let format = parse_wav_header(&bytes)?;

    println!("File: {}", path.display());
    println!("Format tag: {}", format.audio_format);
    println!("Channels: {}", format.num_channels);
    println!("Sample rate: {} Hz", format.sample_rate);
    println!("Bits per sample: {}", format.bits_per_sample);
    println!("Data size: {} bytes", format.data_size);
    println!("Duration: {:.3}s", format.duration_secs());

    let verdict = DeviceConstraints::default().validate_encoded(&bytes);
    if verdict.valid {
        println!("Device check: OK");
    } else {
        println!("Device check: FAILED");
        for error in &verdict.errors {
            println!("  - {}", error);
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn render_preset(preset: &str, rate: u32, seed: Option<u64>) -> Result<AudioBuffer> {
    match seed {
        Some(seed) => synth::generate_with_rng(preset, rate, &mut StdRng::seed_from_u64(seed)),
        None => synth::generate(preset, rate),
    }
}

fn load_constraints(path: Option<&Path>) -> Result<DeviceConstraints> {
    match path {
        Some(path) => DeviceConstraints::from_json_file(path),
        None => Ok(DeviceConstraints::default()),
    }
}

fn effects_from_args(args: &ExportArgs) -> Result<EffectParameters> {
    let mut effects = match &args.effects {
        Some(path) => EffectParameters::from_json_file(path)?,
        None => EffectParameters::default(),
    };
    if let Some(volume) = args.volume {
        effects.volume = volume;
    }
    if let Some(fade_in) = args.fade_in {
        effects.fade_in_secs = fade_in;
    }
    if let Some(fade_out) = args.fade_out {
        effects.fade_out_secs = fade_out;
    }
    if let Some(ceiling) = args.normalize {
        effects.normalize_to = Some(ceiling);
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn export_args(output: &Path) -> ExportArgs {
        ExportArgs {
            preset: Some("sweep-up".to_string()),
            input: None,
            output: output.to_path_buf(),
            start: 0.0,
            end: None,
            fade_in: Some(0.01),
            fade_out: Some(0.1),
            volume: None,
            normalize: Some(0.9),
            effects: None,
            constraints: None,
            seed: None,
        }
    }

    #[test]
    fn test_export_preset_to_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("clip.wav");

        let report = export(&export_args(&output)).unwrap();
        assert!(report.written);

        let format = parse_wav_header(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(format.sample_rate, 44100);
        assert_eq!(format.duration_secs(), 2.0);
    }

    #[test]
    fn test_export_from_input_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.wav");
        let output = dir.path().join("clip.wav");
        generate("bell-soft", &source, 22050, None).unwrap();

        let args = ExportArgs {
            preset: None,
            input: Some(source),
            end: Some(2.25),
            ..export_args(&output)
        };
        let report = export(&args).unwrap();
        assert!(report.written);
        assert_eq!(report.format.map(|f| f.sample_rate), Some(44100));
    }

    #[test]
    fn test_effect_flags_override_json() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("fx.json");
        std::fs::write(&json, r#"{"volume": 0.4, "fade_in_secs": 0.5}"#).unwrap();

        let args = ExportArgs {
            effects: Some(json),
            volume: Some(0.8),
            fade_in: None,
            ..export_args(Path::new("unused.wav"))
        };
        let effects = effects_from_args(&args).unwrap();
        assert_eq!(effects.volume, 0.8);
        assert_eq!(effects.fade_in_secs, 0.5);
        assert_eq!(effects.fade_out_secs, 0.1);
        assert_eq!(effects.normalize_to, Some(0.9));
    }
}
