//! Methodology scorers. Each one reads canonical signals and the loaded
//! criteria and returns a bounded sub-score or label; none of them fail.

pub mod berkus;
pub mod growth;
pub mod pmf;
pub mod scorecard;
pub mod survival;
