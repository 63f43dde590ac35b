//! Error types for the toposurf core library.
//!
//! Every public error enum is paired with a stable, machine-readable code so
//! the CLI and log pipelines can report failures without matching on display
//! strings.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Rejection raised while validating a scalar grid.
///
/// Validation happens before any sweep state exists, so a [`GridError`] never
/// accompanies a partial result.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    /// The grid contained no rows.
    #[error("scalar grid contains no rows")]
    Empty,
    /// A row contained no columns.
    #[error("row {row} of the scalar grid is empty")]
    EmptyRow {
        /// Index of the offending row.
        row: usize,
    },
    /// Rows did not share a common width.
    #[error("row {row} has {actual} columns but the grid is {expected} columns wide")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width observed on the offending row.
        actual: usize,
    },
    /// A flat buffer did not match the declared dimensions.
    #[error("expected {expected} values for the declared dimensions but got {actual}")]
    SizeMismatch {
        /// `rows * cols` for the declared shape.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A value was NaN or infinite and cannot be ordered.
    #[error("value {value} at ({row}, {col}) is not finite")]
    NonFinite {
        /// Row of the offending value.
        row: usize,
        /// Column of the offending value.
        col: usize,
        /// The rejected value.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GridError`] variants.
    enum GridErrorCode for GridError {
        /// The grid contained no rows.
        Empty => Empty => "GRID_EMPTY",
        /// A row contained no columns.
        EmptyRow => EmptyRow { .. } => "GRID_EMPTY_ROW",
        /// Rows did not share a common width.
        Ragged => Ragged { .. } => "GRID_RAGGED",
        /// A flat buffer did not match the declared dimensions.
        SizeMismatch => SizeMismatch { .. } => "GRID_SIZE_MISMATCH",
        /// A value was NaN or infinite.
        NonFinite => NonFinite { .. } => "GRID_NON_FINITE",
    }
}

/// Errors raised while sampling a benchmark surface onto a grid.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// An axis was configured with zero samples.
    #[error("axis `{axis}` must have at least one sample")]
    ZeroSamples {
        /// Axis label (`x` or `y`).
        axis: &'static str,
    },
    /// An axis bound was NaN or infinite.
    #[error("axis `{axis}` has non-finite bounds [{min}, {max}]")]
    NonFiniteBounds {
        /// Axis label (`x` or `y`).
        axis: &'static str,
        /// Lower bound supplied by the caller.
        min: f64,
        /// Upper bound supplied by the caller.
        max: f64,
    },
    /// An axis lower bound exceeded its upper bound.
    #[error("axis `{axis}` is inverted: min {min} > max {max}")]
    InvertedRange {
        /// Axis label (`x` or `y`).
        axis: &'static str,
        /// Lower bound supplied by the caller.
        min: f64,
        /// Upper bound supplied by the caller.
        max: f64,
    },
    /// The domain would sample more cells than [`MAX_SURFACE_CELLS`].
    ///
    /// [`MAX_SURFACE_CELLS`]: crate::MAX_SURFACE_CELLS
    #[error("domain of {x_samples}x{y_samples} samples exceeds the limit of {limit} cells")]
    TooManySamples {
        /// Samples along the column axis.
        x_samples: usize,
        /// Samples along the row axis.
        y_samples: usize,
        /// Largest accepted cell count.
        limit: usize,
    },
    /// A slug did not name a known surface.
    #[error("unknown surface `{provided}`")]
    UnknownSurface {
        /// Raw slug supplied by the caller.
        provided: String,
    },
    /// The sampled values did not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

define_error_codes! {
    /// Stable codes describing [`SurfaceError`] variants.
    enum SurfaceErrorCode for SurfaceError {
        /// An axis was configured with zero samples.
        ZeroSamples => ZeroSamples { .. } => "SURFACE_ZERO_SAMPLES",
        /// An axis bound was NaN or infinite.
        NonFiniteBounds => NonFiniteBounds { .. } => "SURFACE_NON_FINITE_BOUNDS",
        /// An axis lower bound exceeded its upper bound.
        InvertedRange => InvertedRange { .. } => "SURFACE_INVERTED_RANGE",
        /// The domain would sample too many cells.
        TooManySamples => TooManySamples { .. } => "SURFACE_TOO_MANY_SAMPLES",
        /// A slug did not name a known surface.
        UnknownSurface => UnknownSurface { .. } => "SURFACE_UNKNOWN",
        /// The sampled values did not form a valid grid.
        InvalidGrid => Grid(..) => "SURFACE_INVALID_GRID",
    }
}

impl SurfaceError {
    /// Retrieve the inner [`GridErrorCode`] when sampling produced an invalid grid.
    #[must_use]
    pub const fn grid_code(&self) -> Option<GridErrorCode> {
        match self {
            Self::Grid(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Errors raised while pairing highlighted coordinates with a sampled surface.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HighlightError {
    /// A highlighted coordinate fell outside the grid.
    #[error("highlight ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`HighlightError`] variants.
    enum HighlightErrorCode for HighlightError {
        /// A highlighted coordinate fell outside the grid.
        OutOfRange => OutOfRange { .. } => "HIGHLIGHT_OUT_OF_RANGE",
    }
}
