//! Maidenhead grid locator conversion
//!
//! A locator is a sequence of character pairs, each pair refining the
//! previous cell: longitude first, latitude second.
//!
//! | pair | characters | divisions | cell (lon x lat)    |
//! |------|------------|-----------|---------------------|
//! | 1    | A-R        | 18        | 20° x 10°           |
//! | 2    | 0-9        | 10        | 2° x 1°             |
//! | 3    | A-X        | 24        | 5' x 2.5'           |
//! | 4    | 0-9        | 10        | 30" x 15"           |
//! | 5+   | alternating A-X / 0-9                         |

use shack_common::LatLng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid locator is empty")]
    Empty,

    #[error("grid locator must have an even number of characters, got {0}")]
    OddLength(usize),

    #[error("invalid character '{character}' at position {position} of grid locator")]
    InvalidCharacter { position: usize, character: char },
}

/// How a pair at the given index is encoded
#[derive(Clone, Copy)]
enum PairKind {
    Field,
    Digits,
    Letters,
}

impl PairKind {
    fn at(pair_index: usize) -> Self {
        match pair_index {
            0 => PairKind::Field,
            i if i % 2 == 1 => PairKind::Digits,
            _ => PairKind::Letters,
        }
    }

    fn divisions(self) -> u32 {
        match self {
            PairKind::Field => 18,
            PairKind::Digits => 10,
            PairKind::Letters => 24,
        }
    }

    /// Index of `c` within this pair's alphabet
    fn index_of(self, c: char) -> Option<u32> {
        match self {
            PairKind::Digits => c.to_digit(10),
            PairKind::Field | PairKind::Letters => {
                let upper = c.to_ascii_uppercase();
                if !upper.is_ascii_uppercase() {
                    return None;
                }
                let idx = upper as u32 - 'A' as u32;
                (idx < self.divisions()).then_some(idx)
            }
        }
    }

    fn symbol(self, idx: u32) -> char {
        match self {
            PairKind::Digits => char::from_digit(idx, 10).unwrap_or('0'),
            PairKind::Field => char::from(b'A' + idx as u8),
            PairKind::Letters => char::from(b'a' + idx as u8),
        }
    }
}

/// Decode a grid locator into the centre of its smallest cell.
///
/// Accepts any even length of 2 or more characters, case-insensitive.
/// Surrounding whitespace is ignored.
pub fn locator_to_latlng(locator: &str) -> Result<LatLng, GridError> {
    let chars: Vec<char> = locator.trim().chars().collect();

    if chars.is_empty() {
        return Err(GridError::Empty);
    }
    if chars.len() % 2 != 0 {
        return Err(GridError::OddLength(chars.len()));
    }

    let mut lon = -180.0;
    let mut lat = -90.0;
    let mut lon_size = 360.0;
    let mut lat_size = 180.0;

    for (pair_index, pair) in chars.chunks(2).enumerate() {
        let kind = PairKind::at(pair_index);
        let divisions = f64::from(kind.divisions());
        lon_size /= divisions;
        lat_size /= divisions;

        let position = pair_index * 2;
        let lon_idx = kind.index_of(pair[0]).ok_or(GridError::InvalidCharacter {
            position,
            character: pair[0],
        })?;
        let lat_idx = kind.index_of(pair[1]).ok_or(GridError::InvalidCharacter {
            position: position + 1,
            character: pair[1],
        })?;

        lon += f64::from(lon_idx) * lon_size;
        lat += f64::from(lat_idx) * lat_size;
    }

    Ok(LatLng::new(lat + lat_size / 2.0, lon + lon_size / 2.0))
}

/// Encode a coordinate as a locator of `pairs` character pairs (1 pair = 2 chars).
///
/// Subsquare letters are written in lower case, e.g. `KP20le`.
pub fn latlng_to_locator(position: LatLng, pairs: usize) -> String {
    // Keep exact +180 / +90 inside the last cell
    let mut lon = (position.lon + 180.0).clamp(0.0, 360.0 - 1e-9);
    let mut lat = (position.lat + 90.0).clamp(0.0, 180.0 - 1e-9);
    let mut lon_size = 360.0;
    let mut lat_size = 180.0;
    let mut locator = String::with_capacity(pairs * 2);

    for pair_index in 0..pairs.max(1) {
        let kind = PairKind::at(pair_index);
        let divisions = kind.divisions();
        lon_size /= f64::from(divisions);
        lat_size /= f64::from(divisions);

        let lon_idx = ((lon / lon_size).floor() as u32).min(divisions - 1);
        let lat_idx = ((lat / lat_size).floor() as u32).min(divisions - 1);
        lon -= f64::from(lon_idx) * lon_size;
        lat -= f64::from(lat_idx) * lat_size;

        locator.push(kind.symbol(lon_idx));
        locator.push(kind.symbol(lat_idx));
    }

    locator
}
