pub mod criteria;
pub mod decision;
pub mod flags;
pub mod scores;
pub mod signals;
pub mod stage;
pub mod thresholds;
