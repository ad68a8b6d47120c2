//! 平均分分级
//!
//! 等级、升级决定与评语来自同一张阈值表，自上而下匹配第一个满足条件的档位。

use crate::models::results::entities::{Decision, Grade};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub grade: Grade,
    pub decision: Decision,
    pub remark: &'static str,
}

struct Bracket {
    min_average: f64,
    classification: Classification,
}

const BRACKETS: [Bracket; 5] = [
    Bracket {
        min_average: 16.0,
        classification: Classification {
            grade: Grade::A,
            decision: Decision::Pass,
            remark: "Excellent! Keep up the good work.",
        },
    },
    Bracket {
        min_average: 14.0,
        classification: Classification {
            grade: Grade::B,
            decision: Decision::Pass,
            remark: "Very good performance.",
        },
    },
    Bracket {
        min_average: 12.0,
        classification: Classification {
            grade: Grade::C,
            decision: Decision::Pass,
            remark: "Good work, but room for improvement.",
        },
    },
    Bracket {
        min_average: 10.0,
        classification: Classification {
            grade: Grade::D,
            decision: Decision::Pass,
            remark: "Satisfactory. Work harder next time.",
        },
    },
    Bracket {
        min_average: 8.0,
        classification: Classification {
            grade: Grade::E,
            decision: Decision::Repeat,
            remark: "Below average. Need to improve significantly.",
        },
    },
];

const LOWEST: Classification = Classification {
    grade: Grade::F,
    decision: Decision::Fail,
    remark: "Poor performance. Immediate attention required.",
};

pub fn classify(average: f64) -> Classification {
    BRACKETS
        .iter()
        .find(|b| average >= b.min_average)
        .map(|b| b.classification)
        .unwrap_or(LOWEST)
}
