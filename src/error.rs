use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`load_and_split`](crate::load_and_split).
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("file not found at path: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("column not found: '{0}'")]
    MissingColumn(String),

    #[error(
        "cannot stratify: the least populated class in y ({class}) has only {count} member, \
         which is too few; the minimum number of groups for any class cannot be less than 2"
    )]
    CannotStratify { class: String, count: usize },

    #[error("{partition} size {size} should be greater or equal to the number of classes {classes}")]
    TooFewForClasses {
        partition: &'static str,
        size: usize,
        classes: usize,
    },

    #[error("found input variables with inconsistent numbers of samples: x has {x} rows, y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("test_size={0} should be strictly between 0 and 1")]
    InvalidTestSize(f64),

    #[error(
        "with n_samples={n_samples} and test_size={test_size}, one of the resulting \
         train/test partitions would be empty"
    )]
    EmptyPartition { n_samples: usize, test_size: f64 },

    #[error(transparent)]
    Load(#[from] anyhow::Error),
}
