mod split;

pub use split::{shuffle_and_split, DatasetSplit, SplitPlan, SplitRatio};
