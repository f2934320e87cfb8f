//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查接口
//! - [`auth`] - 注册/登录接口
//! - [`tables`] - 桌台管理接口
//! - [`reservations`] - 预订接口

pub mod auth;
pub mod health;
pub mod reservations;
pub mod tables;
