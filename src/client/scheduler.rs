use anyhow::Result;
use chrono::Local;
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::accounts::{ACCOUNTS_PATH, load_accounts, mask_credential};
use crate::client::{AccountClaimer, AccountSummary, ClaimConfig, RewardApi};

/// 调度配置
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub accounts_path: PathBuf,
    /// 两个账号之间的等待
    pub account_delay: Duration,
    /// 两轮之间的等待
    pub cycle_delay: Duration,
    /// 只执行一轮
    pub run_once: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            accounts_path: PathBuf::from(ACCOUNTS_PATH),
            account_delay: Duration::from_secs(60),
            cycle_delay: Duration::from_secs(60),
            run_once: false,
        }
    }
}

/// 停止信号的接收端
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn channel() -> (watch::Sender<bool>, Shutdown) {
        let (tx, rx) = watch::channel(false);
        (tx, Shutdown { rx })
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// 等待停止信号。发送端已释放时永远挂起
    pub async fn triggered(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 账号文件不存在
    AccountsMissing,
    Shutdown,
    /// 单轮模式执行完毕
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// 逐个处理账号并无限循环，直到收到停止信号或账号文件缺失
pub struct Scheduler {
    schedule: ScheduleConfig,
    claim: ClaimConfig,
    shutdown: Shutdown,
}

impl Scheduler {
    pub fn new(schedule: ScheduleConfig, claim: ClaimConfig, shutdown: Shutdown) -> Self {
        Self {
            schedule,
            claim,
            shutdown,
        }
    }

    /// 主循环。`make_client` 为每个账号创建独立的接口会话
    pub async fn run<A, F>(&mut self, make_client: F) -> StopReason
    where
        A: RewardApi,
        F: Fn() -> Result<A>,
    {
        info!(
            "配置: 账号文件={}, 邀请上限={}, 楼层={:?}, 账号间隔={}秒, 轮次间隔={}秒",
            self.schedule.accounts_path.display(),
            self.claim.claim_limit,
            self.claim.floors,
            self.schedule.account_delay.as_secs_f64(),
            self.schedule.cycle_delay.as_secs_f64()
        );

        loop {
            if self.shutdown.is_triggered() {
                info!("收到停止信号，退出");
                return StopReason::Shutdown;
            }

            info!("{}", "=".repeat(50));
            info!("开始执行: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

            match self.run_cycle(&make_client).await {
                Ok(Some(report)) => {
                    info!(
                        "本轮处理完成: 成功 {} 个，失败 {} 个",
                        report.succeeded, report.failed
                    );
                }
                Ok(None) => {
                    error!(
                        "账号文件 {} 不存在",
                        self.schedule.accounts_path.display()
                    );
                    return StopReason::AccountsMissing;
                }
                Err(e) => error!("主循环出错: {:#}", e),
            }

            if self.shutdown.is_triggered() {
                info!("收到停止信号，退出");
                return StopReason::Shutdown;
            }
            if self.schedule.run_once {
                return StopReason::Completed;
            }

            info!(
                "等待 {} 秒后开始下一轮",
                self.schedule.cycle_delay.as_secs_f64()
            );
            if !self.pause(self.schedule.cycle_delay).await {
                return StopReason::Shutdown;
            }
        }
    }

    /// 执行一轮。账号文件不存在时返回 `Ok(None)`
    pub async fn run_cycle<A, F>(&mut self, make_client: &F) -> Result<Option<CycleReport>>
    where
        A: RewardApi,
        F: Fn() -> Result<A>,
    {
        let Some(accounts) = load_accounts(&self.schedule.accounts_path)? else {
            return Ok(None);
        };

        if accounts.is_empty() {
            warn!("账号文件中没有账号");
        }

        let total = accounts.len();
        let mut report = CycleReport::default();

        for (index, init_data) in accounts.iter().enumerate() {
            let number = index + 1;
            info!(
                "处理账号 {}/{} ({})",
                number,
                total,
                mask_credential(init_data)
            );

            match self.process_account(make_client, init_data).await {
                Ok(summary) => {
                    report.succeeded += 1;
                    info!(
                        "账号 {} 处理成功: 邀请 {} 个，蛋 {}/{} 个",
                        number, summary.invites_claimed, summary.eggs_claimed, summary.eggs_attempted
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    error!("账号 {} 处理失败: {:#}", number, e);
                }
            }

            info!(
                "等待 {} 秒后处理下一个账号...",
                self.schedule.account_delay.as_secs_f64()
            );
            if !self.pause(self.schedule.account_delay).await {
                break;
            }
        }

        Ok(Some(report))
    }

    async fn process_account<A, F>(&self, make_client: &F, init_data: &str) -> Result<AccountSummary>
    where
        A: RewardApi,
        F: Fn() -> Result<A>,
    {
        let api = make_client()?;
        AccountClaimer::new(self.claim.clone(), api)
            .process(init_data)
            .await
    }

    /// 可被停止信号打断的等待，被打断时返回 false
    async fn pause(&mut self, duration: Duration) -> bool {
        tokio::select! {
            _ = sleep(duration) => true,
            _ = self.shutdown.triggered() => {
                info!("收到停止信号");
                false
            }
        }
    }
}
