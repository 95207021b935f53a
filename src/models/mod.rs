mod rate;

pub use rate::{Rate, RateDto, RateStats};
