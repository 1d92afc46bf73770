//! Container codecs
//!
//! Only canonical 16-bit PCM WAV is produced.

pub mod wav;

pub use wav::{
    decode_wav, encode_wav, encode_wav_default, float_to_i16, i16_to_float, parse_wav_header,
    WaveFormat, WAVE_FORMAT_PCM, WAV_HEADER_SIZE, WAV_MIME_TYPE,
};
