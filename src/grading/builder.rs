//! 学生学期结果生成
//!
//! 同一 (学生, 学期, 学年) 只生成一次：已存在时返回已有记录，不覆盖。
//! 并发生成同一键时由存储层的唯一约束裁决，落败方读取胜出方的记录。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::aggregate::{WeightedScore, aggregate};
use super::classify::classify;
use crate::errors::{Result, SchoolError};
use crate::models::{
    AcademicPeriod,
    marks::entities::Mark,
    results::entities::{ResultDraft, StudentResult},
    students::entities::Student,
};
use crate::storage::Storage;

/// 生成结果：新建或复用已有记录
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Created(StudentResult),
    Existing(StudentResult),
}

impl Generated {
    pub fn result(&self) -> &StudentResult {
        match self {
            Generated::Created(r) | Generated::Existing(r) => r,
        }
    }

    pub fn into_result(self) -> StudentResult {
        match self {
            Generated::Created(r) | Generated::Existing(r) => r,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Generated::Created(_))
    }
}

#[derive(Clone)]
pub struct ResultBuilder {
    storage: Arc<dyn Storage>,
}

impl ResultBuilder {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 为学生生成某学期结果
    pub async fn generate_for_student(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Generated> {
        if let Some(existing) = self.storage.find_result_by_key(student_id, period).await? {
            debug!(
                "Result already exists for student {} ({}), skipping",
                student_id, period
            );
            return Ok(Generated::Existing(existing));
        }

        let student = self.find_student(student_id).await?;
        self.create_for(&student, period).await
    }

    /// 批量生成时学生已由班级列表解析，不再重复查询
    pub(crate) async fn generate_for(
        &self,
        student: &Student,
        period: &AcademicPeriod,
    ) -> Result<Generated> {
        if let Some(existing) = self.storage.find_result_by_key(student.id, period).await? {
            debug!(
                "Result already exists for student {} ({}), reusing",
                student.id, period
            );
            return Ok(Generated::Existing(existing));
        }

        self.create_for(student, period).await
    }

    /// 按当前成绩重新计算并覆盖已有结果（保留 ID，清空排名）
    pub async fn regenerate_for_student(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Generated> {
        let student = self.find_student(student_id).await?;
        let draft = self.draft_for(&student, period).await?;

        match self.storage.find_result_by_key(student_id, period).await? {
            Some(existing) => {
                let updated = self
                    .storage
                    .update_result(&draft.apply_to(&existing))
                    .await?;
                info!(
                    "Regenerated result {} for student {} ({}): average {}",
                    updated.id, student_id, period, updated.average
                );
                Ok(Generated::Existing(updated))
            }
            None => self.insert_draft(draft).await,
        }
    }

    async fn find_student(&self, student_id: i64) -> Result<Student> {
        self.storage
            .get_student_by_id(student_id)
            .await?
            .ok_or_else(|| SchoolError::student_not_found(format!("Student {student_id} not found")))
    }

    async fn create_for(&self, student: &Student, period: &AcademicPeriod) -> Result<Generated> {
        let draft = self.draft_for(student, period).await?;
        self.insert_draft(draft).await
    }

    async fn insert_draft(&self, draft: ResultDraft) -> Result<Generated> {
        let student_id = draft.student_id;
        let period = draft.period.clone();

        match self.storage.insert_result(draft).await {
            Ok(created) => {
                info!(
                    "Generated result {} for student {} ({}): average {}, grade {}",
                    created.id, student_id, period, created.average, created.grade
                );
                Ok(Generated::Created(created))
            }
            // 并发生成时另一方先写入，返回胜出方的记录
            Err(e) if e.is_duplicate() => {
                match self.storage.find_result_by_key(student_id, &period).await? {
                    Some(existing) => Ok(Generated::Existing(existing)),
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// 读取成绩、解析系数、汇总并分级
    async fn draft_for(&self, student: &Student, period: &AcademicPeriod) -> Result<ResultDraft> {
        let marks = self
            .storage
            .find_marks_by_student_and_period(student.id, period)
            .await?;

        if marks.is_empty() {
            return Err(SchoolError::no_marks_found(format!(
                "No marks found for student {} ({})",
                student.id, period
            )));
        }

        let scores = weighted_scores(&self.storage, &marks).await?;
        let totals = aggregate(&scores)?;
        let classification = classify(totals.average);

        Ok(ResultDraft {
            student_id: student.id,
            class_name: student.class_name.clone(),
            period: period.clone(),
            total_subjects: totals.total_subjects,
            total_coefficient: totals.total_coefficient,
            total_score: totals.total_score,
            average: totals.average,
            grade: classification.grade,
            decision: classification.decision,
            remarks: classification.remark.to_string(),
        })
    }
}

/// 为成绩解析系数，同一科目只查询一次
///
/// 系数取科目当前登记值，不使用成绩录入时的快照；科目缺失或未登记系数时为 1。
pub(crate) async fn weighted_scores(
    storage: &Arc<dyn Storage>,
    marks: &[Mark],
) -> Result<Vec<WeightedScore>> {
    let mut coefficients: HashMap<i64, Option<i32>> = HashMap::new();
    let mut scores = Vec::with_capacity(marks.len());

    for mark in marks {
        let subject_coefficient = match coefficients.get(&mark.subject_id) {
            Some(c) => *c,
            None => {
                let subject = storage.get_subject_by_id(mark.subject_id).await?;
                if subject.is_none() {
                    debug!(
                        "Subject {} not in directory, using coefficient 1",
                        mark.subject_id
                    );
                }
                let c = subject.and_then(|s| s.coefficient);
                coefficients.insert(mark.subject_id, c);
                c
            }
        };
        scores.push(WeightedScore::resolve(mark.score, subject_coefficient));
    }

    Ok(scores)
}
