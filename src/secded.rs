//! SECDED Hamming(13,8) codeword algebra.
//!
//! A single data byte is protected by four Hamming parity bits plus one
//! overall-parity bit, giving a 13-bit codeword that can correct any
//! single-bit error and detect (but not correct) double-bit errors.
//!
//! The 13 bit positions have fixed roles:
//! - position 0 holds the overall-parity bit G,
//! - positions 1, 2, 4 and 8 (the powers of two) hold the parity bits
//!   C0..C3,
//! - the remaining positions 3, 5, 6, 7, 9, 10, 11 and 12 hold the data
//!   bits M0..M7, least significant first.
//!
//! With that layout the syndrome (stored parity XOR recomputed parity)
//! read as an integer is directly the 1-based position of a flipped bit,
//! which is what makes single-bit correction a single XOR. The G bit is
//! an independent cross-check that turns plain single-error correction
//! into SECDED: when the syndrome points at a fix but G still disagrees,
//! two bits were hit and the word is reported uncorrectable instead of
//! being silently mis-corrected.
//!
//! # Examples
//!
//! ```
//! use hwam::secded::{decode, encode, Outcome};
//!
//! let cw = encode(0xA5);
//! assert_eq!(decode(cw), Outcome::Clean(0xA5));
//!
//! // Any single flipped bit is repaired.
//! assert_eq!(decode(cw ^ (1 << 6)), Outcome::Corrected(0xA5));
//!
//! // Two flipped bits are detected, never mis-corrected.
//! assert_eq!(decode(cw ^ 0b1010), Outcome::Uncorrectable);
//! ```

/// An 8-bit payload byte.
pub type DataWord = u8;

/// A 13-bit codeword stored in the low bits of a `u16`.
pub type Codeword = u16;

/// Number of significant bits in a [`Codeword`].
pub const CODEWORD_BITS: u32 = 13;

/// Mask selecting the 13 significant codeword bits.
pub const CODEWORD_MASK: u16 = (1 << CODEWORD_BITS) - 1;

/// Role of a single bit position within the 13-bit codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitRole {
    /// The overall-parity bit G.
    Overall,
    /// Hamming parity bit C0..C3.
    Parity(u8),
    /// Data bit M0..M7.
    Data(u8),
}

/// Fixed position-to-role table shared by encode and decode.
///
/// Encode and decode must agree on which slots carry data and which
/// carry parity; routing both through this one table is what guarantees
/// round-tripping.
pub const LAYOUT: [BitRole; CODEWORD_BITS as usize] = [
    BitRole::Overall,   // 0
    BitRole::Parity(0), // 1
    BitRole::Parity(1), // 2
    BitRole::Data(0),   // 3
    BitRole::Parity(2), // 4
    BitRole::Data(1),   // 5
    BitRole::Data(2),   // 6
    BitRole::Data(3),   // 7
    BitRole::Parity(3), // 8
    BitRole::Data(4),   // 9
    BitRole::Data(5),   // 10
    BitRole::Data(6),   // 11
    BitRole::Data(7),   // 12
];

/// Result of decoding a single codeword.
///
/// `Uncorrectable` deliberately carries no payload: when the code cannot
/// pin down the error pattern, any byte it could hand back would be
/// unreliable, so callers never see one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The codeword was consistent; no bit was touched.
    Clean(DataWord),
    /// A single-bit error was located and repaired.
    Corrected(DataWord),
    /// A multi-bit error pattern the code cannot resolve.
    Uncorrectable,
}

#[inline]
fn bit(value: u16, position: u32) -> u8 {
    ((value >> position) & 1) as u8
}

/// Derives the four Hamming parity bits C0..C3 for a data byte.
///
/// Each parity bit covers the data bits whose codeword position has the
/// corresponding bit set, which is what makes the syndrome read out as a
/// bit position.
pub fn parity_bits(data: DataWord) -> u8 {
    let m = |i: u32| bit(u16::from(data), i);

    let c0 = m(6) ^ m(4) ^ m(3) ^ m(1) ^ m(0);
    let c1 = m(6) ^ m(5) ^ m(3) ^ m(2) ^ m(0);
    let c2 = m(7) ^ m(3) ^ m(2) ^ m(1);
    let c3 = m(7) ^ m(6) ^ m(5) ^ m(4);

    c0 | (c1 << 1) | (c2 << 2) | (c3 << 3)
}

/// Derives the overall-parity bit G covering all data and parity bits.
fn overall_parity(data: DataWord, parity: u8) -> u8 {
    ((u32::from(data).count_ones() + u32::from(parity).count_ones()) & 1) as u8
}

/// Encodes a data byte into its 13-bit codeword.
///
/// Total function: every input has exactly one codeword, and there are
/// no error conditions.
pub fn encode(data: DataWord) -> Codeword {
    let parity = parity_bits(data);
    let overall = overall_parity(data, parity);

    let mut cw: Codeword = 0;
    for (position, role) in LAYOUT.iter().enumerate() {
        let b = match role {
            BitRole::Overall => overall,
            BitRole::Parity(i) => bit(u16::from(parity), u32::from(*i)),
            BitRole::Data(i) => bit(u16::from(data), u32::from(*i)),
        };
        cw |= Codeword::from(b) << position;
    }
    cw
}

/// Extracts the data byte stored in a codeword, ignoring parity.
pub fn extract_data(cw: Codeword) -> DataWord {
    let mut data: DataWord = 0;
    for (position, role) in LAYOUT.iter().enumerate() {
        if let BitRole::Data(i) = role {
            data |= bit(cw, position as u32) << i;
        }
    }
    data
}

/// Extracts the stored parity bits C0..C3 from a codeword.
fn extract_parity(cw: Codeword) -> u8 {
    let mut parity: u8 = 0;
    for (position, role) in LAYOUT.iter().enumerate() {
        if let BitRole::Parity(i) = role {
            parity |= bit(cw, position as u32) << i;
        }
    }
    parity
}

/// Computes the syndrome: stored parity XOR parity recomputed from the
/// stored data bits.
///
/// A zero syndrome means the parity bits are consistent. A value in
/// 1..=12 is the codeword position of a single flipped bit. Values above
/// 12 do not index any position and signal an uncorrectable pattern.
pub fn syndrome(cw: Codeword) -> u8 {
    extract_parity(cw) ^ parity_bits(extract_data(cw))
}

/// Checks the stored overall-parity bit G against the value recomputed
/// from the codeword's data bits.
pub fn overall_parity_ok(cw: Codeword) -> bool {
    let recomputed = encode(extract_data(cw));
    bit(recomputed, 0) == bit(cw, 0)
}

/// Decodes a 13-bit codeword, correcting a single-bit error if present.
///
/// The decode proceeds in two independent stages. The syndrome locates
/// and repairs a single flipped bit (or rules the word out when it lands
/// outside the 13 positions). The overall-parity bit then cross-checks
/// the repaired word: a disagreement at that point means two bits were
/// hit and the syndrome's "fix" cannot be trusted.
///
/// A zero syndrome with a failing G check is the one pattern where G
/// itself flipped; no data or parity position can flip without leaving a
/// nonzero syndrome, so the payload is intact and the word is reported
/// as [`Outcome::Corrected`].
pub fn decode(cw: Codeword) -> Outcome {
    let cw = cw & CODEWORD_MASK;
    let s = syndrome(cw);

    if s == 0 {
        let data = extract_data(cw);
        return if overall_parity_ok(cw) {
            Outcome::Clean(data)
        } else {
            Outcome::Corrected(data)
        };
    }

    if u32::from(s) > CODEWORD_BITS - 1 {
        return Outcome::Uncorrectable;
    }

    let fixed = cw ^ (1 << s);
    if overall_parity_ok(fixed) {
        Outcome::Corrected(extract_data(fixed))
    } else {
        Outcome::Uncorrectable
    }
}
