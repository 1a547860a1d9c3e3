use std::fmt;

/// A detected bar stroke: its bounding box in working-image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bar {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Bar {
    /// Create a bar from its bounding box
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First row covered by the bar
    pub fn top(&self) -> i32 {
        self.y
    }

    /// One past the last row covered by the bar
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Shift the bar by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// IMb bar height class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarType {
    /// Short centered bar
    Tracker = 0,
    /// Extends above the tracker band
    Ascender = 1,
    /// Extends below the tracker band
    Descender = 2,
    /// Extends both ways
    Full = 3,
}

impl BarType {
    /// All four types, in table order
    pub const ALL: [BarType; 4] = [
        BarType::Tracker,
        BarType::Ascender,
        BarType::Descender,
        BarType::Full,
    ];

    /// Single-letter code used in barcode strings
    pub fn as_char(self) -> char {
        match self {
            BarType::Tracker => 'T',
            BarType::Ascender => 'A',
            BarType::Descender => 'D',
            BarType::Full => 'F',
        }
    }

    /// Parse a single-letter code
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'T' => Some(BarType::Tracker),
            'A' => Some(BarType::Ascender),
            'D' => Some(BarType::Descender),
            'F' => Some(BarType::Full),
            _ => None,
        }
    }

    /// How many tracker-heights tall a bar of this type is
    pub fn height_units(self) -> f32 {
        match self {
            BarType::Tracker => 1.0,
            BarType::Ascender | BarType::Descender => 2.0,
            BarType::Full => 3.0,
        }
    }
}

impl fmt::Display for BarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
