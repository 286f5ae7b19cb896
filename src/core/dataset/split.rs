use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One of the three disjoint partitions of the source file set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Test,
    Valid,
}

impl DatasetSplit {
    /// Splits in copy order
    pub fn all() -> [DatasetSplit; 3] {
        [DatasetSplit::Train, DatasetSplit::Test, DatasetSplit::Valid]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test => "test",
            DatasetSplit::Valid => "valid",
        }
    }

    /// Relative images folder for this split, e.g. `train/images`
    pub fn images_subfolder(&self) -> String {
        format!("{}/images", self.as_str())
    }
}

impl fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fractions of the file set assigned to (train, test, valid).
///
/// The fractions are not required to sum to 1. Only `train` and `test` drive
/// the cut indices; whatever is left over after those two slices becomes the
/// validation set, so `valid` is informational.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatio {
    pub train: f64,
    pub test: f64,
    pub valid: f64,
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self {
            train: 0.8,
            test: 0.1,
            valid: 0.1,
        }
    }
}

impl SplitRatio {
    pub fn new(train: f64, test: f64, valid: f64) -> Self {
        Self { train, test, valid }
    }

    /// Cut indices `(cut1, cut2)` for a list of `total` items.
    ///
    /// `cut1 = floor(total * train)`, `cut2 = cut1 + floor(total * test)`.
    /// Float-to-usize casts saturate, so negative or NaN fractions give an
    /// empty slice; both cuts are clamped to `total`.
    pub fn cut_indices(&self, total: usize) -> (usize, usize) {
        let n = total as f64;
        let cut1 = ((n * self.train).floor() as usize).min(total);
        let cut2 = cut1
            .saturating_add((n * self.test).floor() as usize)
            .min(total);
        (cut1, cut2)
    }
}

impl fmt::Display for SplitRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.train, self.test, self.valid)
    }
}

impl FromStr for SplitRatio {
    type Err = String;

    /// Parses `train,test,valid`, e.g. `0.8,0.1,0.1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!(
                "expected three comma-separated fractions (train,test,valid), got {:?}",
                s
            ));
        }

        let mut values = [0.0f64; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|e| format!("invalid fraction {:?}: {}", part, e))?;
        }

        Ok(Self::new(values[0], values[1], values[2]))
    }
}

/// Items partitioned into three contiguous slices of a shuffled list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
    pub valid: Vec<T>,
}

impl<T> SplitPlan<T> {
    /// Partition `items` in their current order:
    /// `[0, cut1)` train, `[cut1, cut2)` test, `[cut2, N)` valid.
    pub fn partition(mut items: Vec<T>, ratio: &SplitRatio) -> Self {
        let (cut1, cut2) = ratio.cut_indices(items.len());

        let valid = items.split_off(cut2);
        let test = items.split_off(cut1);

        Self {
            train: items,
            test,
            valid,
        }
    }

    pub fn get(&self, split: DatasetSplit) -> &[T] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Test => &self.test,
            DatasetSplit::Valid => &self.valid,
        }
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.test.len() + self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shuffle `items` uniformly (Fisher-Yates) and partition them by `ratio`.
pub fn shuffle_and_split<T, R>(mut items: Vec<T>, ratio: &SplitRatio, rng: &mut R) -> SplitPlan<T>
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
    let plan = SplitPlan::partition(items, ratio);

    debug!(
        "Split plan: {} train, {} test, {} valid",
        plan.train.len(),
        plan.test.len(),
        plan.valid.len()
    );

    plan
}
