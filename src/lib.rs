//! School Results - 学校成绩与学期结果服务
//!
//! 基于 Actix Web 构建，由录入的成绩计算学期结果（加权平均、等级、升级决定）与班级排名。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 结果计算引擎（汇总、分级、生成、排名）
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM / 内存）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
