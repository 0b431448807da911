use std::collections::BTreeMap;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::model::{Column, Table, Value};
use crate::error::SplitError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How rows are divided between the train and test partitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Fraction of rows reserved for testing, strictly within (0, 1).
    pub test_size: f64,
    /// Seed for the partition; equal seeds give equal partitions.
    pub random_state: u64,
    /// Preserve the class proportions of the target in both partitions.
    pub stratify: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            random_state: 42,
            stratify: true,
        }
    }
}

impl SplitOptions {
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    pub fn with_stratify(mut self, stratify: bool) -> Self {
        self.stratify = stratify;
        self
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The four partitions.  Row `i` of `x_train` belongs with `y_train[i]`,
/// and likewise for the test side.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Table,
    pub x_test: Table,
    pub y_train: Column,
    pub y_test: Column,
}

impl TrainTestSplit {
    /// `(x_train, x_test, y_train, y_test)`.
    pub fn into_parts(self) -> (Table, Table, Column, Column) {
        (self.x_train, self.x_test, self.y_train, self.y_test)
    }
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// Partition `x` and `y` into train and test sets.
///
/// `x` and `y` must describe the same rows in the same order, as produced
/// by [`Table::split_off`]; differing lengths are an error. The test side
/// receives `ceil(test_size * n)` rows. With `stratify` set, the target must be discrete: every class needs
/// at least two members so that both sides can hold one.
pub fn train_test_split(
    x: &Table,
    y: &Column,
    options: &SplitOptions,
) -> Result<TrainTestSplit, SplitError> {
    if x.len() != y.len() {
        return Err(SplitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let (n_train, n_test) = partition_sizes(y.len(), options.test_size)?;
    let mut rng = StdRng::seed_from_u64(options.random_state);

    let (train, test) = if options.stratify {
        stratified_positions(&y.values, n_train, n_test, &mut rng)?
    } else {
        shuffled_positions(y.len(), n_test, &mut rng)
    };

    Ok(TrainTestSplit {
        x_train: x.take(&train),
        x_test: x.take(&test),
        y_train: y.take(&train),
        y_test: y.take(&test),
    })
}

/// `(n_train, n_test)` for `n_samples` rows.
fn partition_sizes(n_samples: usize, test_size: f64) -> Result<(usize, usize), SplitError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }
    let n_test = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples - n_test;
    if n_train == 0 || n_test == 0 {
        return Err(SplitError::EmptyPartition {
            n_samples,
            test_size,
        });
    }
    Ok((n_train, n_test))
}

fn shuffled_positions(n_samples: usize, n_test: usize, rng: &mut StdRng) -> (Vec<usize>, Vec<usize>) {
    let mut permutation: Vec<usize> = (0..n_samples).collect();
    permutation.shuffle(rng);
    let train = permutation.split_off(n_test);
    (train, permutation)
}

fn stratified_positions(
    labels: &[Value],
    n_train: usize,
    n_test: usize,
    rng: &mut StdRng,
) -> Result<(Vec<usize>, Vec<usize>), SplitError> {
    let mut classes: BTreeMap<&Value, Vec<usize>> = BTreeMap::new();
    for (pos, label) in labels.iter().enumerate() {
        classes.entry(label).or_default().push(pos);
    }

    if let Some((class, members)) = classes.iter().min_by_key(|(_, m)| m.len()) {
        if members.len() < 2 {
            return Err(SplitError::CannotStratify {
                class: class.to_string(),
                count: members.len(),
            });
        }
    }

    let n_classes = classes.len();
    if n_train < n_classes {
        return Err(SplitError::TooFewForClasses {
            partition: "train",
            size: n_train,
            classes: n_classes,
        });
    }
    if n_test < n_classes {
        return Err(SplitError::TooFewForClasses {
            partition: "test",
            size: n_test,
            classes: n_classes,
        });
    }

    let counts: Vec<usize> = classes.values().map(Vec::len).collect();
    let train_counts = approximate_mode(&counts, n_train, rng);
    let remaining: Vec<usize> = counts
        .iter()
        .zip(&train_counts)
        .map(|(total, taken)| total - taken)
        .collect();
    let test_counts = approximate_mode(&remaining, n_test, rng);

    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);
    for ((class, mut members), (&n_i, &t_i)) in classes
        .into_iter()
        .zip(train_counts.iter().zip(&test_counts))
    {
        debug!("class {class}: {} members -> {n_i} train, {t_i} test", members.len());
        members.shuffle(rng);
        train.extend_from_slice(&members[..n_i]);
        test.extend_from_slice(&members[n_i..n_i + t_i]);
    }

    train.shuffle(rng);
    test.shuffle(rng);
    Ok((train, test))
}

/// Most likely per-class draw counts when drawing `n_draws` items without
/// replacement from classes of the given sizes.
///
/// Each class first gets the floor of its proportional share. The draws left
/// over go to the classes with the largest fractional remainders; classes
/// tied on remainder are ordered by `rng`.
fn approximate_mode(class_counts: &[usize], n_draws: usize, rng: &mut StdRng) -> Vec<usize> {
    let total: usize = class_counts.iter().sum();
    if total == 0 {
        return vec![0; class_counts.len()];
    }

    // share = count * n_draws / total, kept as integer quotient and remainder
    let mut floored: Vec<usize> = class_counts.iter().map(|&c| c * n_draws / total).collect();
    let remainders: Vec<usize> = class_counts.iter().map(|&c| c * n_draws % total).collect();
    let mut need_to_add = n_draws - floored.iter().sum::<usize>();

    let mut levels = remainders.clone();
    levels.sort_unstable_by(|a, b| b.cmp(a));
    levels.dedup();

    for level in levels {
        if need_to_add == 0 || level == 0 {
            break;
        }
        let mut tied: Vec<usize> = (0..remainders.len())
            .filter(|&i| remainders[i] == level)
            .collect();
        tied.shuffle(rng);
        let add_now = tied.len().min(need_to_add);
        for &i in &tied[..add_now] {
            floored[i] += 1;
        }
        need_to_add -= add_now;
    }

    floored
}
