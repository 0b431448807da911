//! Load a pre-cleaned tabular dataset, separate the target column from the
//! features, and split both into stratified train/test partitions.

pub mod data;
pub mod error;
pub mod pipeline;

pub use data::loader::load_file;
pub use data::model::{Column, Table, Value};
pub use data::split::{SplitOptions, TrainTestSplit, train_test_split};
pub use error::SplitError;
pub use pipeline::load_and_split;
