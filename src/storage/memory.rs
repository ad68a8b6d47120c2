//! 进程内存储实现
//!
//! 基于 DashMap，数据不落盘。`database.url = "memory://"` 时启用（生产环境禁用），测试中也直接使用。
//! 服务没有登记学生与科目的接口，以此启动时目录为空。
//! 唯一键通过 DashMap 的 entry 锁保证检查与写入的原子性。

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::errors::{Result, SchoolError};
use crate::models::{
    AcademicPeriod, Trimester,
    marks::{
        entities::Mark,
        requests::{MarkListQuery, NewMark, UpdateMarkRequest},
    },
    results::{
        entities::{ResultDraft, StudentResult},
        requests::ResultQuery,
    },
    students::entities::Student,
    subjects::entities::Subject,
};
use crate::storage::{MarkRepository, ResultRepository, StudentDirectory, SubjectDirectory};

pub const MEMORY_URL_SCHEME: &str = "memory://";

// (学生, 科目, 学期, 学年)
type MarkKey = (i64, i64, Trimester, String);
// (学生, 学期, 学年)
type ResultKey = (i64, Trimester, String);

#[derive(Default)]
pub struct MemoryStorage {
    students: DashMap<i64, Student>,
    subjects: DashMap<i64, Subject>,
    marks: DashMap<i64, Mark>,
    mark_keys: DashMap<MarkKey, i64>,
    results: DashMap<i64, StudentResult>,
    result_keys: DashMap<ResultKey, i64>,
    next_id: AtomicI64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 写入或替换学生（学生登记不属于本服务，供初始化与测试使用）
    pub fn upsert_student(&self, student: Student) {
        self.students.insert(student.id, student);
    }

    /// 写入或替换科目
    pub fn upsert_subject(&self, subject: Subject) {
        self.subjects.insert(subject.id, subject);
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}

#[async_trait]
impl StudentDirectory for MemoryStorage {
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        Ok(self.students.get(&id).map(|s| s.value().clone()))
    }

    async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<Student>> {
        let mut students: Vec<Student> = self
            .students
            .iter()
            .filter(|s| s.class_name == class_name)
            .map(|s| s.value().clone())
            .collect();
        students.sort_by_key(|s| s.id);
        Ok(students)
    }
}

#[async_trait]
impl SubjectDirectory for MemoryStorage {
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        Ok(self.subjects.get(&id).map(|s| s.value().clone()))
    }
}

#[async_trait]
impl MarkRepository for MemoryStorage {
    async fn create_mark(&self, mark: NewMark) -> Result<Mark> {
        let key = (
            mark.student_id,
            mark.subject_id,
            mark.period.trimester,
            mark.period.academic_year.clone(),
        );

        match self.mark_keys.entry(key) {
            Entry::Occupied(_) => Err(SchoolError::duplicate_mark(format!(
                "Mark already exists for student {}, subject {} in this period",
                mark.student_id, mark.subject_id
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id();
                let created = Mark {
                    id,
                    student_id: mark.student_id,
                    subject_id: mark.subject_id,
                    class_name: mark.class_name,
                    trimester: mark.period.trimester,
                    academic_year: mark.period.academic_year,
                    score: mark.score,
                    total_score: mark.total_score,
                    coefficient: mark.coefficient,
                    remarks: mark.remarks,
                    entered_at: chrono::Utc::now(),
                };
                self.marks.insert(id, created.clone());
                slot.insert(id);
                Ok(created)
            }
        }
    }

    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>> {
        Ok(self.marks.get(&id).map(|m| m.value().clone()))
    }

    async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>> {
        let Some(mut mark) = self.marks.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(score) = update.score {
            mark.score = score;
        }
        if let Some(total_score) = update.total_score {
            mark.total_score = total_score;
        }
        if let Some(coefficient) = update.coefficient {
            mark.coefficient = coefficient;
        }
        if let Some(remarks) = update.remarks {
            mark.remarks = Some(remarks);
        }

        Ok(Some(mark.clone()))
    }

    async fn delete_mark(&self, id: i64) -> Result<bool> {
        let Some((_, mark)) = self.marks.remove(&id) else {
            return Ok(false);
        };
        self.mark_keys.remove(&(
            mark.student_id,
            mark.subject_id,
            mark.trimester,
            mark.academic_year,
        ));
        Ok(true)
    }

    async fn list_marks(&self, query: MarkListQuery) -> Result<Vec<Mark>> {
        let mut marks: Vec<Mark> = self
            .marks
            .iter()
            .filter(|m| query.student_id.is_none_or(|id| id == m.student_id))
            .filter(|m| {
                query
                    .class_name
                    .as_deref()
                    .is_none_or(|c| c == m.class_name)
            })
            .filter(|m| query.trimester.is_none_or(|t| t == m.trimester))
            .filter(|m| {
                query
                    .academic_year
                    .as_deref()
                    .is_none_or(|y| y == m.academic_year)
            })
            .map(|m| m.value().clone())
            .collect();
        marks.sort_by_key(|m| m.id);
        Ok(marks)
    }

    async fn find_marks_by_student_and_period(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Vec<Mark>> {
        self.list_marks(MarkListQuery {
            student_id: Some(student_id),
            class_name: None,
            trimester: Some(period.trimester),
            academic_year: Some(period.academic_year.clone()),
        })
        .await
    }
}

#[async_trait]
impl ResultRepository for MemoryStorage {
    async fn find_result_by_key(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Option<StudentResult>> {
        let key = (student_id, period.trimester, period.academic_year.clone());
        let Some(id) = self.result_keys.get(&key).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.results.get(&id).map(|r| r.value().clone()))
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<StudentResult>> {
        Ok(self.results.get(&id).map(|r| r.value().clone()))
    }

    async fn list_results_by_student(
        &self,
        student_id: i64,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>> {
        let mut results: Vec<StudentResult> = self
            .results
            .iter()
            .filter(|r| r.student_id == student_id)
            .filter(|r| query.matches(r.trimester, &r.academic_year))
            .map(|r| r.value().clone())
            .collect();
        results.sort_by(|a, b| {
            b.academic_year
                .cmp(&a.academic_year)
                .then(a.trimester.cmp(&b.trimester))
        });
        Ok(results)
    }

    async fn list_results_by_class(
        &self,
        class_name: &str,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>> {
        let mut results: Vec<StudentResult> = self
            .results
            .iter()
            .filter(|r| r.class_name == class_name)
            .filter(|r| query.matches(r.trimester, &r.academic_year))
            .map(|r| r.value().clone())
            .collect();
        results.sort_by_key(|r| r.id);
        results.sort_by_key(|r| (r.class_position.is_none(), r.class_position));
        Ok(results)
    }

    async fn insert_result(&self, draft: ResultDraft) -> Result<StudentResult> {
        let key = (
            draft.student_id,
            draft.period.trimester,
            draft.period.academic_year.clone(),
        );

        match self.result_keys.entry(key) {
            Entry::Occupied(_) => Err(SchoolError::duplicate_result(format!(
                "Result already exists for student {} in this period",
                draft.student_id
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id();
                let created = StudentResult {
                    id,
                    student_id: draft.student_id,
                    class_name: draft.class_name,
                    trimester: draft.period.trimester,
                    academic_year: draft.period.academic_year,
                    total_subjects: draft.total_subjects,
                    total_coefficient: draft.total_coefficient,
                    total_score: draft.total_score,
                    average: draft.average,
                    grade: draft.grade,
                    decision: draft.decision,
                    remarks: draft.remarks,
                    class_position: None,
                    total_students: None,
                    generated_at: chrono::Utc::now(),
                };
                self.results.insert(id, created.clone());
                slot.insert(id);
                Ok(created)
            }
        }
    }

    async fn update_result(&self, result: &StudentResult) -> Result<StudentResult> {
        match self.results.get_mut(&result.id) {
            Some(mut stored) => {
                *stored = result.clone();
                Ok(result.clone())
            }
            None => Err(SchoolError::result_not_found(format!(
                "Result {} not found",
                result.id
            ))),
        }
    }
}
