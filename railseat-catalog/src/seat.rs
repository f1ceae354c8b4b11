use railseat_core::BookingError;
use std::fmt;
use std::str::FromStr;

/// One of the two seating partitions of a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    A,
    B,
}

impl Section {
    /// Allocation and chart order.
    pub const ALL: [Section; 2] = [Section::A, Section::B];

    pub fn letter(self) -> char {
        match self {
            Section::A => 'A',
            Section::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Section::A),
            'B' => Some(Section::B),
            _ => None,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Section::A => 0,
            Section::B => 1,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Accepts `A`/`B` and the long form `SectionA`/`SectionB`.
impl FromStr for Section {
    type Err = SeatLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "SectionA" => Ok(Section::A),
            "B" | "SectionB" => Ok(Section::B),
            other => Err(SeatLabelError::UnknownSection(other.to_string())),
        }
    }
}

/// Typed seat address. The string form (`A0`, `B19`) only exists at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatLabel {
    section: Section,
    index: usize,
}

impl SeatLabel {
    pub fn new(section: Section, index: usize) -> Self {
        Self { section, index }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Parse a label and check it against a section capacity.
    pub fn parse(raw: &str, capacity: usize) -> Result<Self, SeatLabelError> {
        let label: SeatLabel = raw.parse()?;
        if label.index >= capacity {
            return Err(SeatLabelError::OutOfRange {
                label: raw.to_string(),
                capacity,
            });
        }
        Ok(label)
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.section.letter(), self.index)
    }
}

/// Shape-only parse: section letter followed by a canonical decimal index
/// (no sign, no leading zeros). Bounds are checked by [`SeatLabel::parse`].
impl FromStr for SeatLabel {
    type Err = SeatLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(SeatLabelError::Empty)?;
        let section = Section::from_letter(letter)
            .ok_or_else(|| SeatLabelError::UnknownSection(letter.to_string()))?;

        let digits = chars.as_str();
        let canonical = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && (digits == "0" || !digits.starts_with('0'));
        if !canonical {
            return Err(SeatLabelError::MalformedIndex(s.to_string()));
        }

        let index = digits
            .parse::<usize>()
            .map_err(|_| SeatLabelError::MalformedIndex(s.to_string()))?;

        Ok(Self { section, index })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatLabelError {
    #[error("Seat label is empty")]
    Empty,

    #[error("Unknown train section: {0}")]
    UnknownSection(String),

    #[error("Malformed seat label: {0}")]
    MalformedIndex(String),

    #[error("Seat {label} is outside a section of {capacity} seats")]
    OutOfRange { label: String, capacity: usize },
}

impl From<SeatLabelError> for BookingError {
    fn from(err: SeatLabelError) -> Self {
        BookingError::InvalidArgument(err.to_string())
    }
}
