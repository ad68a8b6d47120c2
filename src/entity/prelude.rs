//! 预导入模块，方便使用

pub use super::marks::{ActiveModel as MarkActiveModel, Entity as Marks, Model as MarkModel};
pub use super::results::{
    ActiveModel as ResultActiveModel, Entity as Results, Model as ResultModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
