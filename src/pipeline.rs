use std::path::Path;

use log::{debug, info};

use crate::data::loader::load_file;
use crate::data::model::{Column, Table};
use crate::data::split::{SplitOptions, train_test_split};
use crate::error::SplitError;

/// Load a pre-cleaned table, separate `target` from the features and split
/// both into train and test partitions.
///
/// Returns `(x_train, x_test, y_train, y_test)`.
pub fn load_and_split<P: AsRef<Path>>(
    source: P,
    target: &str,
    options: &SplitOptions,
) -> Result<(Table, Table, Column, Column), SplitError> {
    let path = source.as_ref();
    if !path.exists() {
        return Err(SplitError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let table = load_file(path)?;
    info!("Loaded data from: {}", path.display());
    info!("Data shape: {:?}", table.shape());

    let (features, labels) = table.split_off(target)?;
    debug!("Class counts for '{}': {:?}", labels.name, labels.value_counts());

    let split = train_test_split(&features, &labels, options)?;
    info!("Splitting complete.");
    info!("  - X_train: {:?}", split.x_train.shape());
    info!("  - X_test : {:?}", split.x_test.shape());

    Ok(split.into_parts())
}
