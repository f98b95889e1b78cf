//! Streaming file transforms built on the SECDED codeword algebra.
//!
//! Encoding reads the input a byte at a time and writes each byte's
//! 13-bit codeword as a little-endian `u16` (the top three bits of the
//! second byte are padding and always zero). Decoding reads the stream
//! two bytes at a time, reconstructs each codeword from the low 13 bits
//! and recovers the payload byte.
//!
//! Decoding is best-effort: a unit that decodes as uncorrectable is
//! logged and skipped rather than aborting the whole transform, so one
//! badly corrupted word costs one output byte, not the file. Only
//! stream-level failures (opening, reading, writing) abort.
//!
//! Derived file names follow the `.hwam` convention: encoding appends
//! the extension, decoding strips it. An input without the extension
//! decodes to `<name>.decoded` instead of silently overwriting an
//! unrelated file.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::secded::{decode, encode, Outcome, CODEWORD_MASK};

/// Extension marking a Hamming-protected file.
pub const HWAM_EXTENSION: &str = "hwam";

/// Per-transform counters reported back to the caller.
///
/// The transform itself stays quiet on stdout; per-unit diagnostics go
/// through the `log` facade and the caller decides what to do with the
/// totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Units processed (input bytes on encode, 2-byte groups on decode).
    pub units: u64,
    /// Units that needed a single-bit repair while decoding.
    pub corrected: u64,
    /// Units dropped as uncorrectable while decoding.
    pub dropped: u64,
}

/// Output path for encoding: the input path with `.hwam` appended.
pub fn encoded_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(HWAM_EXTENSION);
    PathBuf::from(name)
}

/// Output path for decoding: the input path with a final `.hwam`
/// extension stripped, or `.decoded` appended when there is none.
pub fn decoded_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == HWAM_EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = OsString::from(input.as_os_str());
        name.push(".decoded");
        PathBuf::from(name)
    }
}

/// Encodes every byte of `reader` into a 2-byte codeword on `writer`.
pub fn encode_stream<R: Read, W: Write>(reader: R, mut writer: W) -> Result<TransformReport> {
    let mut report = TransformReport::default();

    for byte in reader.bytes() {
        let cw = encode(byte?);
        writer.write_all(&cw.to_le_bytes())?;
        report.units += 1;
    }

    writer.flush()?;
    Ok(report)
}

/// Decodes 2-byte codeword groups from `reader` into payload bytes on
/// `writer`, skipping uncorrectable units.
pub fn decode_stream<R: Read, W: Write>(mut reader: R, mut writer: W) -> Result<TransformReport> {
    let mut report = TransformReport::default();
    let mut buf = [0u8; 2];

    loop {
        let filled = read_unit(&mut reader, &mut buf)?;
        if filled == 0 {
            break;
        }
        if filled == 1 {
            warn!("trailing odd byte at end of input, ignored");
            break;
        }

        let cw = u16::from_le_bytes(buf) & CODEWORD_MASK;
        report.units += 1;

        match decode(cw) {
            Outcome::Clean(data) => writer.write_all(&[data])?,
            Outcome::Corrected(data) => {
                debug!("unit {}: single-bit error repaired", report.units - 1);
                report.corrected += 1;
                writer.write_all(&[data])?;
            }
            Outcome::Uncorrectable => {
                warn!("unit {}: uncorrectable, byte dropped", report.units - 1);
                report.dropped += 1;
            }
        }
    }

    writer.flush()?;
    Ok(report)
}

/// Fills up to two bytes, tolerating short reads. Returns how many bytes
/// were actually read (0 at end of stream).
fn read_unit<R: Read>(reader: &mut R, buf: &mut [u8; 2]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Encodes `input` into `<input>.hwam`, returning the output path and
/// the transform counters.
pub fn encode_file(input: &Path) -> Result<(PathBuf, TransformReport)> {
    let output = encoded_path(require_file_name(input)?);
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(&output)?);
    let report = encode_stream(reader, writer)?;
    Ok((output, report))
}

/// Decodes `input` into the path derived by [`decoded_path`], returning
/// the output path and the transform counters.
pub fn decode_file(input: &Path) -> Result<(PathBuf, TransformReport)> {
    let output = decoded_path(require_file_name(input)?);
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(&output)?);
    let report = decode_stream(reader, writer)?;
    Ok((output, report))
}

fn require_file_name(input: &Path) -> Result<&Path> {
    if input.file_name().is_none() {
        return Err(Error::InvalidInput(format!(
            "path has no file name: {}",
            input.display()
        )));
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hwam-test-{}-{}", std::process::id(), tag))
    }

    fn random_payload(len: usize) -> Vec<u8> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x48574d);
        (0..len).map(|_| rng.gen()).collect()
    }

    #[test]
    fn test_path_derivation() {
        assert_eq!(
            encoded_path(Path::new("notes.txt")),
            PathBuf::from("notes.txt.hwam")
        );
        assert_eq!(
            decoded_path(Path::new("notes.txt.hwam")),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            decoded_path(Path::new("notes.txt")),
            PathBuf::from("notes.txt.decoded")
        );
    }

    #[test]
    fn test_stream_roundtrip() {
        let payload = random_payload(4096);

        let mut encoded = Vec::new();
        let report = encode_stream(payload.as_slice(), &mut encoded).unwrap();
        assert_eq!(report.units, 4096);
        assert_eq!(encoded.len(), payload.len() * 2);

        let mut decoded = Vec::new();
        let report = decode_stream(encoded.as_slice(), &mut decoded).unwrap();
        assert_eq!(report.units, 4096);
        assert_eq!(report.corrected, 0);
        assert_eq!(report.dropped, 0);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_empty_stream() {
        let mut encoded = Vec::new();
        let report = encode_stream(&[][..], &mut encoded).unwrap();
        assert_eq!(report, TransformReport::default());
        assert!(encoded.is_empty());

        let mut decoded = Vec::new();
        let report = decode_stream(&[][..], &mut decoded).unwrap();
        assert_eq!(report, TransformReport::default());
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_single_bit_corruption_is_repaired() {
        let payload = random_payload(256);

        let mut encoded = Vec::new();
        encode_stream(payload.as_slice(), &mut encoded).unwrap();

        // One flipped bit somewhere in the middle of the stream.
        encoded[101] ^= 0x08;

        let mut decoded = Vec::new();
        let report = decode_stream(encoded.as_slice(), &mut decoded).unwrap();
        assert_eq!(report.corrected, 1);
        assert_eq!(report.dropped, 0);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_double_bit_corruption_drops_the_unit() {
        let payload = random_payload(256);

        let mut encoded = Vec::new();
        encode_stream(payload.as_slice(), &mut encoded).unwrap();

        // Two flipped bits inside unit 40.
        encoded[80] ^= 0b0110;

        let mut decoded = Vec::new();
        let report = decode_stream(encoded.as_slice(), &mut decoded).unwrap();
        assert_eq!(report.units, 256);
        assert_eq!(report.corrected, 0);
        assert_eq!(report.dropped, 1);
        assert_eq!(decoded.len(), payload.len() - 1);

        // Everything around the dropped unit survives untouched.
        assert_eq!(&decoded[..40], &payload[..40]);
        assert_eq!(&decoded[40..], &payload[41..]);
    }

    #[test]
    fn test_padding_bits_are_ignored() {
        let payload = random_payload(32);

        let mut encoded = Vec::new();
        encode_stream(payload.as_slice(), &mut encoded).unwrap();

        // Bits 13..16 of each unit carry no information.
        encoded[1] |= 0xE0;

        let mut decoded = Vec::new();
        let report = decode_stream(encoded.as_slice(), &mut decoded).unwrap();
        assert_eq!(report.corrected, 0);
        assert_eq!(report.dropped, 0);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_trailing_odd_byte_is_ignored() {
        let payload = random_payload(8);

        let mut encoded = Vec::new();
        encode_stream(payload.as_slice(), &mut encoded).unwrap();
        encoded.push(0xAB);

        let mut decoded = Vec::new();
        let report = decode_stream(encoded.as_slice(), &mut decoded).unwrap();
        assert_eq!(report.units, 8);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_file_roundtrip() {
        let payload = random_payload(1000);
        let input = temp_path("roundtrip.bin");
        std::fs::write(&input, &payload).unwrap();

        let (protected, report) = encode_file(&input).unwrap();
        assert_eq!(protected, temp_path("roundtrip.bin.hwam"));
        assert_eq!(report.units, 1000);
        assert_eq!(std::fs::metadata(&protected).unwrap().len(), 2000);

        // Decoding regenerates the original name, so clear it first.
        std::fs::remove_file(&input).unwrap();

        let (recovered, report) = decode_file(&protected).unwrap();
        assert_eq!(recovered, input);
        assert_eq!(report.units, 1000);
        assert_eq!(report.dropped, 0);
        assert_eq!(std::fs::read(&recovered).unwrap(), payload);

        std::fs::remove_file(&protected).unwrap();
        std::fs::remove_file(&recovered).unwrap();
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let missing = temp_path("does-not-exist.bin");
        assert!(encode_file(&missing).is_err());
        assert!(decode_file(&missing).is_err());
    }
}
