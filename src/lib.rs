//! SECDED Hamming(13,8) encoding applied as a streaming transform over
//! binary files.
//!
//! Each payload byte is packed into a 13-bit codeword carrying four
//! Hamming parity bits and one overall-parity bit, stored on disk as two
//! bytes. Single-bit errors in a codeword are corrected transparently on
//! decode; double-bit errors are detected and the affected byte is
//! dropped rather than silently mis-corrected.
//!
//! The [`secded`] module holds the codeword algebra; [`transform`] wraps
//! it into buffered file encode/decode with `.hwam` name derivation.

pub mod error;
pub mod secded;
pub mod transform;

pub use error::{Error, Result};
pub use secded::{decode, encode, Codeword, DataWord, Outcome};
pub use transform::{decode_file, encode_file, TransformReport};
