//! Strict UTF-8 <-> GBK transcoding.
//!
//! `encoding_rs` defaults to lossy behaviour (U+FFFD on decode, HTML numeric
//! character references on encode). Only the `*_without_replacement` entry
//! points are used here, so a malformed or unmappable input always surfaces as a
//! [`CodecError`] and never as silently altered output.

use encoding_rs::{DecoderResult, EncoderResult, GBK};

use crate::encoding::{Direction, EncodingLabel};
use crate::error::CodecError;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Convert `input` in the direction given, failing on the first invalid or
/// unmappable sequence.
///
/// A leading UTF-8 BOM is content like any other character. U+FEFF has no
/// GBK mapping, so such input fails with [`CodecError::Encode`] at offset 0.
///
/// # Errors
/// [`CodecError::Decode`] when `input` is not valid in the source encoding,
/// [`CodecError::Encode`] when a character has no mapping in the target.
pub fn transform(input: &[u8], direction: Direction) -> Result<Vec<u8>, CodecError> {
    match direction {
        Direction::ToUtf8 => decode_gbk(input).map(String::into_bytes),
        Direction::ToGbk => encode_gbk(decode_utf8(input)?),
    }
}

/// Strictly validate `input` as UTF-8.
///
/// # Errors
/// Returns [`CodecError::Decode`] pointing at the first invalid byte.
pub fn decode_utf8(input: &[u8]) -> Result<&str, CodecError> {
    std::str::from_utf8(input).map_err(|e| CodecError::Decode {
        encoding: EncodingLabel::Utf8,
        offset: e.valid_up_to(),
    })
}

/// Strictly decode GBK `input`.
///
/// `encoding_rs` implements GBK with the GB18030 decoder, which also accepts
/// four-byte sequences. Those are outside GBK and are rejected here.
///
/// # Errors
/// Returns [`CodecError::Decode`] at the first malformed sequence, including a
/// lead byte truncated by the end of input and the lead byte of a four-byte
/// GB18030 sequence.
pub fn decode_gbk(input: &[u8]) -> Result<String, CodecError> {
    match four_byte_sequence_at(input) {
        Some(offset) => {
            // 手前に不正なバイト列があればそちらを先に報告する
            run_gbk_decoder(&input[..offset])?;
            Err(CodecError::Decode {
                encoding: EncodingLabel::Gbk,
                offset,
            })
        }
        None => run_gbk_decoder(input),
    }
}

/// Offset of the first GB18030 four-byte sequence, i.e. a lead byte followed
/// by an ASCII digit where GBK expects a trail byte.
///
/// Only meaningful up to the first malformed pair; past that point the
/// decoder fails anyway.
fn four_byte_sequence_at(input: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            0x81..=0xFE => {
                if matches!(input.get(i + 1), Some(0x30..=0x39)) {
                    return Some(i);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    None
}

fn run_gbk_decoder(input: &[u8]) -> Result<String, CodecError> {
    let mut decoder = GBK.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(input.len())
        .ok_or(CodecError::Overflow(input.len()))?;
    let mut out = String::with_capacity(capacity);
    let mut consumed = 0;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&input[consumed..], &mut out, true);
        consumed += read;
        match result {
            DecoderResult::InputEmpty => return Ok(out),
            DecoderResult::OutputFull => {
                let more = decoder
                    .max_utf8_buffer_length_without_replacement(input.len() - consumed)
                    .ok_or(CodecError::Overflow(input.len()))?;
                out.reserve(more);
            }
            DecoderResult::Malformed(bad, after) => {
                let offset = consumed.saturating_sub(usize::from(bad) + usize::from(after));
                return Err(CodecError::Decode {
                    encoding: EncodingLabel::Gbk,
                    offset,
                });
            }
        }
    }
}

/// Strictly encode `text` as GBK.
///
/// # Errors
/// Returns [`CodecError::Encode`] for the first character outside the GBK
/// repertoire, with its byte offset in `text`.
pub fn encode_gbk(text: &str) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GBK.new_encoder();
    let capacity = encoder
        .max_buffer_length_from_utf8_without_replacement(text.len())
        .ok_or(CodecError::Overflow(text.len()))?;
    let mut out = Vec::with_capacity(capacity);
    let mut consumed = 0;

    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(&text[consumed..], &mut out, true);
        consumed += read;
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => {
                let more = encoder
                    .max_buffer_length_from_utf8_without_replacement(text.len() - consumed)
                    .ok_or(CodecError::Overflow(text.len()))?;
                out.reserve(more);
            }
            EncoderResult::Unmappable(character) => {
                return Err(CodecError::Encode {
                    encoding: EncodingLabel::Gbk,
                    character,
                    offset: consumed - character.len_utf8(),
                });
            }
        }
    }
}
