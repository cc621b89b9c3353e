//! Error types for the voxclust core library.
//!
//! The region-growth engine itself is infallible; errors only arise while
//! validating configuration or externally supplied cluster assignments.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
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
            /// Returns the stable machine-readable form of this code.
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
            #[doc = concat!("Returns the stable [`", stringify!($CodeTy), "`] for this error.")]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while configuring a [`crate::Clusterer`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusterError {
    /// The distance threshold was negative, NaN or infinite.
    #[error("threshold must be a finite, non-negative distance (got {got})")]
    InvalidThreshold {
        /// Rejected threshold value.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`ClusterError`] variants.
    enum ClusterErrorCode for ClusterError {
        /// The distance threshold was negative, NaN or infinite.
        InvalidThreshold => InvalidThreshold { .. } => "VOXCLUST_INVALID_THRESHOLD",
    }
}

/// Error returned when externally supplied assignments do not form a
/// partition with contiguous cluster identifiers.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PartitionError {
    /// A point carried no cluster identifier.
    #[error("point {index} has no cluster assignment")]
    Unassigned {
        /// Position of the point in the input sequence.
        index: usize,
    },
    /// No point was assigned to cluster `0`.
    #[error("cluster identifiers must include 0")]
    MissingZero,
    /// Identifiers skip at least one value below the maximum.
    #[error("cluster identifiers must be contiguous; {missing} is unused")]
    Gap {
        /// Smallest identifier below the maximum with no members.
        missing: u64,
    },
    /// The largest identifier cannot be represented as a cluster count.
    #[error("cluster identifier {id} exceeds the host pointer width")]
    Overflow {
        /// Offending identifier.
        id: u64,
    },
}

define_error_codes! {
    /// Stable codes describing [`PartitionError`] variants.
    enum PartitionErrorCode for PartitionError {
        /// A point carried no cluster identifier.
        Unassigned => Unassigned { .. } => "VOXCLUST_PARTITION_UNASSIGNED",
        /// No point was assigned to cluster `0`.
        MissingZero => MissingZero => "VOXCLUST_PARTITION_MISSING_ZERO",
        /// Identifiers skip at least one value below the maximum.
        Gap => Gap { .. } => "VOXCLUST_PARTITION_GAP",
        /// The largest identifier cannot be represented as a cluster count.
        Overflow => Overflow { .. } => "VOXCLUST_PARTITION_OVERFLOW",
    }
}

/// Convenient alias for results returned by the configuration API.
pub type Result<T> = core::result::Result<T, ClusterError>;
