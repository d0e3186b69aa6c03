use std::fmt;

/// Specific defect found while validating a tax bracket table
#[derive(Debug, Clone, PartialEq)]
pub enum BracketTableError {
    Empty,
    /// The first bracket must begin at zero
    NonZeroStart(f64),
    /// `lower_bound` of bracket `index` does not equal the previous `upper_bound`
    Gap { index: usize, expected: f64, found: f64 },
    /// Bracket `index` has `upper_bound <= lower_bound`
    Descending { index: usize },
    /// Bracket `index` has a negative, non-finite, or >100% rate
    InvalidRate { index: usize, rate: f64 },
    /// A bracket other than the last one is unbounded
    UnboundedBeforeEnd { index: usize },
    /// The last bracket has an upper bound
    BoundedTop,
}

impl fmt::Display for BracketTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketTableError::Empty => write!(f, "bracket table is empty"),
            BracketTableError::NonZeroStart(lower) => {
                write!(f, "first bracket starts at {lower}, expected 0")
            }
            BracketTableError::Gap {
                index,
                expected,
                found,
            } => write!(
                f,
                "bracket {index} starts at {found} but previous bracket ends at {expected}"
            ),
            BracketTableError::Descending { index } => {
                write!(f, "bracket {index} has an upper bound below its lower bound")
            }
            BracketTableError::InvalidRate { index, rate } => {
                write!(f, "bracket {index} has invalid rate {rate}")
            }
            BracketTableError::UnboundedBeforeEnd { index } => {
                write!(f, "bracket {index} is unbounded but is not the last bracket")
            }
            BracketTableError::BoundedTop => write!(f, "last bracket must be unbounded"),
        }
    }
}

impl std::error::Error for BracketTableError {}

/// Validation failures raised by the analytics engine
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Negative or non-finite monetary input
    InvalidAmount { field: &'static str, value: f64 },
    /// Unknown recurrence tag
    UnsupportedFrequency(String),
    InvalidBracketTable(BracketTableError),
    /// Base salary must be positive
    InvalidSalary(f64),
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::InvalidAmount { field, value } => {
                write!(f, "invalid amount for {field}: {value}")
            }
            AnalyticsError::UnsupportedFrequency(tag) => {
                write!(f, "unsupported recurrence frequency {tag:?}")
            }
            AnalyticsError::InvalidBracketTable(e) => write!(f, "invalid tax bracket table: {e}"),
            AnalyticsError::InvalidSalary(salary) => {
                write!(f, "base salary must be positive, got {salary}")
            }
        }
    }
}

impl std::error::Error for AnalyticsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyticsError::InvalidBracketTable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BracketTableError> for AnalyticsError {
    fn from(e: BracketTableError) -> Self {
        AnalyticsError::InvalidBracketTable(e)
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Reject negative, NaN and infinite money values
pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AnalyticsError::InvalidAmount { field, value })
    }
}
