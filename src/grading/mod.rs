//! 结果计算引擎：成绩汇总、分级、结果生成与班级排名

pub mod aggregate;
pub mod builder;
pub mod classify;
pub mod ranker;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{Aggregate, WeightedScore, aggregate};
pub use builder::{Generated, ResultBuilder};
pub use classify::{Classification, classify};
pub use ranker::{ClassRanker, ClassRanking};
