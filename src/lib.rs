//! # Kitty Claim - Kitty 奖励自动领取工具
//!
//! 按账号文件逐个登录 Kitty，领取邀请奖励和各楼层的蛋，并打印余额。
//!
//! ## 功能模块
//!
//! - `api`: 接口响应的数据结构定义
//! - `client`: HTTP客户端、账号领取器和调度循环
//! - `accounts`: 账号文件读取
//!
//! ## 基本用法
//!
//! ```rust,no_run
//! use kitty_claim::client::{
//!     ClaimConfig, DEFAULT_BASE_URL, DEFAULT_ORIGIN, HttpClient, ScheduleConfig, Scheduler,
//!     Shutdown,
//! };
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (_tx, shutdown) = Shutdown::channel();
//!     let mut scheduler =
//!         Scheduler::new(ScheduleConfig::default(), ClaimConfig::default(), shutdown);
//!
//!     scheduler
//!         .run(|| HttpClient::new(DEFAULT_BASE_URL, DEFAULT_ORIGIN, Duration::from_secs(30)))
//!         .await;
//! }
//! ```
//!
//! ## 单独处理一个账号
//!
//! ```rust,no_run
//! use kitty_claim::client::{
//!     AccountClaimer, ClaimConfig, DEFAULT_BASE_URL, DEFAULT_ORIGIN, HttpClient,
//! };
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HttpClient::new(DEFAULT_BASE_URL, DEFAULT_ORIGIN, Duration::from_secs(30))?;
//!     let claimer = AccountClaimer::new(ClaimConfig::default(), client);
//!
//!     let summary = claimer.process("query_id=...").await?;
//!     println!("领取邀请: {}", summary.invites_claimed);
//!
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod api;
pub mod client;

// 重新导出常用的类型和结构体，方便使用
pub use api::*;
pub use client::{AccountClaimer, ClaimConfig, HttpClient, ScheduleConfig, Scheduler};
