pub mod samples;

pub use samples::{parse_sample, train_size, Dataset, Sample, DEFAULT_TRAIN_FRACTION, SAMPLE_WIDTH};
