use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string().not_null())
                    .col(ColumnDef::new(Students::ClassName).string().not_null())
                    .col(ColumnDef::new(Students::ParentContact).string().not_null())
                    .col(ColumnDef::new(Students::Address).string().null())
                    .col(
                        ColumnDef::new(Students::RegistrationDate)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Description).text().null())
                    .col(ColumnDef::new(Subjects::Coefficient).integer().null())
                    .col(
                        ColumnDef::new(Subjects::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Marks::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::ClassName).string().not_null())
                    .col(ColumnDef::new(Marks::Trimester).string().not_null())
                    .col(ColumnDef::new(Marks::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Marks::Score).double().not_null())
                    .col(
                        ColumnDef::new(Marks::TotalScore)
                            .double()
                            .not_null()
                            .default(20.0),
                    )
                    .col(
                        ColumnDef::new(Marks::Coefficient)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Marks::Remarks).text().null())
                    .col(ColumnDef::new(Marks::EnteredAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学期结果表
        manager
            .create_table(
                Table::create()
                    .table(Results::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Results::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Results::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Results::ClassName).string().not_null())
                    .col(ColumnDef::new(Results::Trimester).string().not_null())
                    .col(ColumnDef::new(Results::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Results::TotalSubjects).integer().not_null())
                    .col(
                        ColumnDef::new(Results::TotalCoefficient)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Results::TotalScore).double().not_null())
                    .col(ColumnDef::new(Results::Average).double().not_null())
                    .col(ColumnDef::new(Results::Grade).string().not_null())
                    .col(ColumnDef::new(Results::Decision).string().not_null())
                    .col(ColumnDef::new(Results::Remarks).text().not_null())
                    .col(ColumnDef::new(Results::ClassPosition).integer().null())
                    .col(ColumnDef::new(Results::TotalStudents).integer().null())
                    .col(
                        ColumnDef::new(Results::GeneratedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Results::Table, Results::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class_name")
                    .table(Students::Table)
                    .col(Students::ClassName)
                    .to_owned(),
            )
            .await?;

        // 成绩唯一约束：同一学生同一科目同一学期只能有一条
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_marks_student_subject_period")
                    .table(Marks::Table)
                    .col(Marks::StudentId)
                    .col(Marks::SubjectId)
                    .col(Marks::Trimester)
                    .col(Marks::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_marks_class_period")
                    .table(Marks::Table)
                    .col(Marks::ClassName)
                    .col(Marks::Trimester)
                    .col(Marks::AcademicYear)
                    .to_owned(),
            )
            .await?;

        // 结果唯一约束：同一学生同一学期只能有一条
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_results_student_period")
                    .table(Results::Table)
                    .col(Results::StudentId)
                    .col(Results::Trimester)
                    .col(Results::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_results_class_period")
                    .table(Results::Table)
                    .col(Results::ClassName)
                    .col(Results::Trimester)
                    .col(Results::AcademicYear)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Results::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    ClassName,
    ParentContact,
    Address,
    RegistrationDate,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Code,
    Description,
    Coefficient,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Marks {
    #[sea_orm(iden = "marks")]
    Table,
    Id,
    StudentId,
    SubjectId,
    ClassName,
    Trimester,
    AcademicYear,
    Score,
    TotalScore,
    Coefficient,
    Remarks,
    EnteredAt,
}

#[derive(DeriveIden)]
enum Results {
    #[sea_orm(iden = "results")]
    Table,
    Id,
    StudentId,
    ClassName,
    Trimester,
    AcademicYear,
    TotalSubjects,
    TotalCoefficient,
    TotalScore,
    Average,
    Grade,
    Decision,
    Remarks,
    ClassPosition,
    TotalStudents,
    GeneratedAt,
}
