//! 班级排名
//!
//! 先为班级内每个学生生成（或复用）结果，全部完成后再统一排序并写回名次。
//! 排名按结果中记录的班级快照筛选，不再核对学生当前所在班级。

use std::sync::Arc;

use futures_util::{StreamExt, stream};
use tracing::{debug, info, warn};

use super::builder::{Generated, ResultBuilder};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AcademicPeriod,
    results::{
        entities::StudentResult,
        responses::{ResultWithStudent, SkippedStudent},
    },
    students::entities::{Student, StudentSummary},
};
use crate::storage::Storage;

/// 一次班级排名的结果
#[derive(Debug, Clone, Default)]
pub struct ClassRanking {
    // 按名次排列
    pub results: Vec<ResultWithStudent>,
    pub generated: usize,
    pub reused: usize,
    pub skipped: Vec<SkippedStudent>,
}

#[derive(Clone)]
pub struct ClassRanker {
    storage: Arc<dyn Storage>,
    builder: ResultBuilder,
    concurrency: usize,
}

impl ClassRanker {
    pub fn new(storage: Arc<dyn Storage>, concurrency: usize) -> Self {
        Self {
            builder: ResultBuilder::new(storage.clone()),
            storage,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn rank_class(
        &self,
        class_name: &str,
        period: &AcademicPeriod,
    ) -> Result<ClassRanking> {
        let students = self.storage.list_students_by_class(class_name).await?;
        if students.is_empty() {
            return Err(SchoolError::no_students_in_class(format!(
                "No students found in class {class_name}"
            )));
        }

        // buffered 保持输出顺序与学生列表一致，名次并列时按此顺序
        let builder = &self.builder;
        let outcomes: Vec<(Student, Result<Generated>)> = stream::iter(students)
            .map(|student| async move {
                let outcome = builder.generate_for(&student, period).await;
                (student, outcome)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut ranking = ClassRanking::default();
        let mut ranked: Vec<(StudentResult, StudentSummary)> = Vec::with_capacity(outcomes.len());

        for (student, outcome) in outcomes {
            let generated = match outcome {
                Ok(generated) => generated,
                Err(e) => {
                    warn!(
                        "Skipping student {} in class {}: {}",
                        student.id, class_name, e
                    );
                    ranking.skipped.push(skipped(student.id, &e));
                    continue;
                }
            };

            let created = generated.is_created();
            let result = generated.into_result();
            if result.class_name != class_name {
                let e = SchoolError::result_class_mismatch(format!(
                    "Result {} was generated for class {}",
                    result.id, result.class_name
                ));
                warn!("Skipping student {} in class {}: {}", student.id, class_name, e);
                ranking.skipped.push(skipped(student.id, &e));
                continue;
            }

            if created {
                ranking.generated += 1;
            } else {
                ranking.reused += 1;
            }
            ranked.push((result, student.summary()));
        }

        // 稳定排序：平均分相同保持原顺序，名次不并列
        ranked.sort_by(|a, b| b.0.average.total_cmp(&a.0.average));

        let total_students = i32::try_from(ranked.len()).map_err(|_| {
            SchoolError::validation(format!("Too many students in class {class_name}"))
        })?;

        // 单条写回失败不中断，其余学生的名次照常保存，失败者记入 skipped
        let mut position = 0;
        for (mut result, summary) in ranked {
            position += 1;
            result.class_position = Some(position);
            result.total_students = Some(total_students);
            let result = match self.storage.update_result(&result).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(
                        "Failed to save position {} for student {} in class {}: {}",
                        position, summary.id, class_name, e
                    );
                    ranking.skipped.push(skipped(summary.id, &e));
                    continue;
                }
            };
            debug!(
                "Student {} ranked {}/{} in class {}",
                summary.id, position, total_students, class_name
            );
            ranking.results.push(ResultWithStudent {
                result,
                student: Some(summary),
            });
        }

        info!(
            "Ranked class {} ({}): {} generated, {} reused, {} skipped",
            class_name,
            period,
            ranking.generated,
            ranking.reused,
            ranking.skipped.len()
        );

        Ok(ranking)
    }
}

fn skipped(student_id: i64, error: &SchoolError) -> SkippedStudent {
    SkippedStudent {
        student_id,
        error_code: error.code().to_string(),
        reason: error.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::testing::{period, seed_mark, seed_student, seed_subject, student};
    use crate::models::{
        marks::{
            entities::Mark,
            requests::{MarkListQuery, NewMark, UpdateMarkRequest},
        },
        results::{entities::ResultDraft, requests::ResultQuery},
        subjects::entities::Subject,
    };
    use crate::storage::{
        MarkRepository, MemoryStorage, ResultRepository, StudentDirectory, SubjectDirectory,
    };

    const CLASS: &str = "Form 1A";

    fn ranker(storage: &Arc<MemoryStorage>) -> ClassRanker {
        ClassRanker::new(storage.clone(), 4)
    }

    fn positions(ranking: &ClassRanking) -> Vec<(i64, Option<i32>)> {
        ranking
            .results
            .iter()
            .map(|r| (r.result.student_id, r.result.class_position))
            .collect()
    }

    async fn seed_class(storage: &MemoryStorage, scores: &[(i64, f64)]) {
        seed_subject(storage, 100, Some(1));
        for (id, score) in scores {
            seed_student(storage, *id, CLASS);
            seed_mark(storage, *id, 100, *score).await;
        }
    }

    #[tokio::test]
    async fn test_ties_keep_retrieval_order() {
        let storage = Arc::new(MemoryStorage::new());
        seed_class(&storage, &[(1, 15.0), (2, 15.0), (3, 9.0)]).await;

        let ranking = ranker(&storage).rank_class(CLASS, &period()).await.unwrap();

        assert_eq!(
            positions(&ranking),
            vec![(1, Some(1)), (2, Some(2)), (3, Some(3))]
        );
        assert!(
            ranking
                .results
                .iter()
                .all(|r| r.result.total_students == Some(3))
        );
        assert_eq!(ranking.generated, 3);
        assert_eq!(ranking.reused, 0);
        assert!(ranking.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_sorted_by_average_descending() {
        let storage = Arc::new(MemoryStorage::new());
        seed_class(&storage, &[(1, 8.5), (2, 17.0), (3, 12.25)]).await;

        let ranking = ranker(&storage).rank_class(CLASS, &period()).await.unwrap();

        assert_eq!(
            positions(&ranking),
            vec![(2, Some(1)), (3, Some(2)), (1, Some(3))]
        );
        let first = &ranking.results[0];
        assert_eq!(
            first.student.as_ref().map(|s| s.first_name.as_str()),
            Some("First2")
        );
    }

    #[tokio::test]
    async fn test_positions_are_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        seed_class(&storage, &[(1, 11.0), (2, 14.0)]).await;

        ranker(&storage).rank_class(CLASS, &period()).await.unwrap();

        let stored = storage.find_result_by_key(1, &period()).await.unwrap().unwrap();
        assert_eq!(stored.class_position, Some(2));
        assert_eq!(stored.total_students, Some(2));
    }

    #[tokio::test]
    async fn test_rerun_reuses_and_reranks() {
        let storage = Arc::new(MemoryStorage::new());
        seed_class(&storage, &[(1, 15.0), (2, 12.0), (3, 9.0)]).await;
        let ranker = ranker(&storage);

        ranker.rank_class(CLASS, &period()).await.unwrap();
        // 学生 3 补录成绩后重新生成，排名被清空
        seed_subject(&storage, 101, Some(3));
        seed_mark(&storage, 3, 101, 20.0).await;
        ranker
            .builder
            .regenerate_for_student(3, &period())
            .await
            .unwrap();

        let again = ranker.rank_class(CLASS, &period()).await.unwrap();

        assert_eq!(again.generated, 0);
        assert_eq!(again.reused, 3);
        assert_eq!(storage.result_count(), 3);
        assert_eq!(
            positions(&again),
            vec![(3, Some(1)), (1, Some(2)), (2, Some(3))]
        );
    }

    #[tokio::test]
    async fn test_students_without_marks_are_skipped() {
        let storage = Arc::new(MemoryStorage::new());
        seed_class(&storage, &[(1, 13.0), (3, 10.0)]).await;
        seed_student(&storage, 2, CLASS);

        let ranking = ranker(&storage).rank_class(CLASS, &period()).await.unwrap();

        assert_eq!(ranking.results.len(), 2);
        assert!(
            ranking
                .results
                .iter()
                .all(|r| r.result.total_students == Some(2))
        );
        assert_eq!(ranking.skipped.len(), 1);
        assert_eq!(ranking.skipped[0].student_id, 2);
        assert_eq!(ranking.skipped[0].error_code, "E013");
    }

    #[tokio::test]
    async fn test_result_from_other_class_is_skipped() {
        let storage = Arc::new(MemoryStorage::new());
        seed_class(&storage, &[(1, 13.0)]).await;
        // 学生 2 在 Form 1B 时已生成结果，之后转入 Form 1A
        seed_student(&storage, 2, "Form 1B");
        seed_mark(&storage, 2, 100, 18.0).await;
        ResultBuilder::new(storage.clone())
            .generate_for_student(2, &period())
            .await
            .unwrap();
        storage.upsert_student(student(2, CLASS));

        let ranking = ranker(&storage).rank_class(CLASS, &period()).await.unwrap();

        assert_eq!(positions(&ranking), vec![(1, Some(1))]);
        assert_eq!(ranking.skipped.len(), 1);
        assert_eq!(ranking.skipped[0].student_id, 2);
        assert_eq!(ranking.skipped[0].error_code, "E014");
        let stale = storage.find_result_by_key(2, &period()).await.unwrap().unwrap();
        assert_eq!(stale.class_position, None);
    }

    /// 写回指定学生的结果时返回数据库错误，其余操作转交内存存储
    struct FailingWrites {
        inner: Arc<MemoryStorage>,
        failing_student: i64,
    }

    #[async_trait::async_trait]
    impl StudentDirectory for FailingWrites {
        async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
            self.inner.get_student_by_id(id).await
        }

        async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<Student>> {
            self.inner.list_students_by_class(class_name).await
        }
    }

    #[async_trait::async_trait]
    impl SubjectDirectory for FailingWrites {
        async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
            self.inner.get_subject_by_id(id).await
        }
    }

    #[async_trait::async_trait]
    impl MarkRepository for FailingWrites {
        async fn create_mark(&self, mark: NewMark) -> Result<Mark> {
            self.inner.create_mark(mark).await
        }

        async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>> {
            self.inner.get_mark_by_id(id).await
        }

        async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>> {
            self.inner.update_mark(id, update).await
        }

        async fn delete_mark(&self, id: i64) -> Result<bool> {
            self.inner.delete_mark(id).await
        }

        async fn list_marks(&self, query: MarkListQuery) -> Result<Vec<Mark>> {
            self.inner.list_marks(query).await
        }

        async fn find_marks_by_student_and_period(
            &self,
            student_id: i64,
            period: &AcademicPeriod,
        ) -> Result<Vec<Mark>> {
            self.inner
                .find_marks_by_student_and_period(student_id, period)
                .await
        }
    }

    #[async_trait::async_trait]
    impl ResultRepository for FailingWrites {
        async fn find_result_by_key(
            &self,
            student_id: i64,
            period: &AcademicPeriod,
        ) -> Result<Option<StudentResult>> {
            self.inner.find_result_by_key(student_id, period).await
        }

        async fn get_result_by_id(&self, id: i64) -> Result<Option<StudentResult>> {
            self.inner.get_result_by_id(id).await
        }

        async fn list_results_by_student(
            &self,
            student_id: i64,
            query: &ResultQuery,
        ) -> Result<Vec<StudentResult>> {
            self.inner.list_results_by_student(student_id, query).await
        }

        async fn list_results_by_class(
            &self,
            class_name: &str,
            query: &ResultQuery,
        ) -> Result<Vec<StudentResult>> {
            self.inner.list_results_by_class(class_name, query).await
        }

        async fn insert_result(&self, draft: ResultDraft) -> Result<StudentResult> {
            self.inner.insert_result(draft).await
        }

        async fn update_result(&self, result: &StudentResult) -> Result<StudentResult> {
            if result.student_id == self.failing_student {
                return Err(SchoolError::database_operation("connection reset"));
            }
            self.inner.update_result(result).await
        }
    }

    #[tokio::test]
    async fn test_write_back_failure_does_not_abort_batch() {
        let memory = Arc::new(MemoryStorage::new());
        seed_class(&memory, &[(1, 15.0), (2, 12.0), (3, 9.0)]).await;
        let storage = Arc::new(FailingWrites {
            inner: memory.clone(),
            failing_student: 2,
        });

        let ranking = ClassRanker::new(storage, 2)
            .rank_class(CLASS, &period())
            .await
            .unwrap();

        assert_eq!(positions(&ranking), vec![(1, Some(1)), (3, Some(3))]);
        assert_eq!(ranking.generated, 3);
        assert_eq!(ranking.skipped.len(), 1);
        assert_eq!(ranking.skipped[0].student_id, 2);
        assert_eq!(ranking.skipped[0].error_code, "E003");

        let third = memory.find_result_by_key(3, &period()).await.unwrap().unwrap();
        assert_eq!(third.class_position, Some(3));
        assert_eq!(third.total_students, Some(3));
        let failed = memory.find_result_by_key(2, &period()).await.unwrap().unwrap();
        assert_eq!(failed.class_position, None);
    }

    #[tokio::test]
    async fn test_empty_class() {
        let storage = Arc::new(MemoryStorage::new());

        let err = ranker(&storage)
            .rank_class("Form 9Z", &period())
            .await
            .unwrap_err();

        assert!(matches!(err, SchoolError::NoStudentsInClass(_)));
    }
}
