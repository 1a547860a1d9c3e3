//! Bar-type transitions between neighbouring bars.
//!
//! Each type has an opposite extreme (Tracker/Full, Ascender/Descender).
//! When both edges of the next bar move, the next bar is the opposite of the
//! previous one; when only one edge moves, it is one of the two remaining
//! types.

use crate::models::BarType;

/// Which edges of the next bar moved by more than the height threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exceedance {
    /// Top and bottom both moved
    Both = 0,
    /// Only the top edge moved
    TopOnly = 1,
    /// Only the bottom edge moved
    BottomOnly = 2,
}

impl Exceedance {
    /// All three patterns, in table column order
    pub const ALL: [Exceedance; 3] = [
        Exceedance::Both,
        Exceedance::TopOnly,
        Exceedance::BottomOnly,
    ];

    /// `None` when neither edge moved (the type carries over unchanged)
    pub fn from_flags(top_exceeds: bool, bottom_exceeds: bool) -> Option<Self> {
        match (top_exceeds, bottom_exceeds) {
            (true, true) => Some(Exceedance::Both),
            (true, false) => Some(Exceedance::TopOnly),
            (false, true) => Some(Exceedance::BottomOnly),
            (false, false) => None,
        }
    }
}

use crate::models::BarType::{Ascender as A, Descender as D, Full as F, Tracker as T};

/// Rows indexed by previous type (`BarType as usize`), columns by
/// [`Exceedance`].
const TRANSITIONS: [[BarType; 3]; 4] = [
    // Both, TopOnly, BottomOnly
    [F, A, D], // from Tracker
    [D, T, F], // from Ascender
    [A, F, T], // from Descender
    [T, D, A], // from Full
];

/// Type of the next bar given the previous bar's type and which edges moved
pub fn transition(prev: BarType, exceedance: Exceedance) -> BarType {
    TRANSITIONS[prev as usize][exceedance as usize]
}
