use anyhow::{Result, anyhow};
use log::{info, warn};
use std::time::Duration;
use tokio::time::sleep;

use crate::api::Balance;
use crate::client::RewardApi;

/// 单个账号的领取配置
#[derive(Debug, Clone)]
pub struct ClaimConfig {
    /// 每个账号每轮最多成功领取的邀请数
    pub claim_limit: u32,
    /// 邀请列表单页数量
    pub page_size: u32,
    /// 两次邀请领取之间的间隔
    pub claim_pacing: Duration,
    /// 依次轮询的楼层
    pub floors: Vec<u32>,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            claim_limit: 20,
            page_size: 20,
            claim_pacing: Duration::from_secs(1),
            floors: vec![1, 2],
        }
    }
}

/// 一个账号处理完成后的结果汇总
#[derive(Debug, Clone, Default)]
pub struct AccountSummary {
    pub invites_claimed: u32,
    pub eggs_attempted: u32,
    pub eggs_claimed: u32,
    pub balance: Option<Balance>,
}

/// 账号领取器：登录 → 领邀请 → 查余额 → 领蛋
pub struct AccountClaimer<A> {
    config: ClaimConfig,
    api: A,
}

impl<A: RewardApi> AccountClaimer<A> {
    pub fn new(config: ClaimConfig, api: A) -> Self {
        Self { config, api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 登录并取出会话 token
    pub async fn login(&self, init_data: &str) -> Result<String> {
        let response = self
            .api
            .login(init_data)
            .await
            .ok_or_else(|| anyhow!("登录失败: 无响应"))?;

        if !response.has_data() {
            return Err(anyhow!(
                "登录失败: code={:?}, msg={}",
                response.code,
                response.msg.as_deref().unwrap_or("")
            ));
        }

        Ok(response.into_data()?.token.token)
    }

    /// 领取邀请奖励，返回成功领取的数量
    pub async fn claim_invites(&self, token: &str) -> u32 {
        info!("处理邀请...");

        let invites = match self
            .api
            .list_invites(token, "", self.config.page_size)
            .await
            .and_then(|r| r.data)
        {
            Some(list) if !list.is_empty() => list,
            _ => {
                warn!("没有可领取的邀请");
                return 0;
            }
        };

        let limit = self.config.claim_limit;
        let mut claimed = 0;

        for invite in &invites {
            if claimed >= limit {
                warn!("已达到每日领取上限 ({})", limit);
                break;
            }

            match self.api.claim_invite(token, &invite.id).await {
                Some(response) if response.is_success() => {
                    claimed += 1;
                    info!("成功领取邀请 {} ({}/{})", invite.id, claimed, limit);
                }
                Some(response) => {
                    warn!(
                        "领取邀请 {} 失败，错误码: {:?}，错误信息: {}",
                        invite.id,
                        response.code,
                        response.msg.as_deref().unwrap_or("")
                    );
                }
                None => warn!("领取邀请 {} 失败", invite.id),
            }

            sleep(self.config.claim_pacing).await;
        }

        info!("共领取 {} 个邀请", claimed);
        claimed
    }

    /// 查询余额，失败时只记录日志
    pub async fn fetch_balance(&self, token: &str) -> Option<Balance> {
        info!("查询余额...");

        match self.api.get_balance(token).await.and_then(|r| r.data) {
            Some(balance) => {
                info!("Diamond : {}", balance.diamond.amount);
                info!("Kitty   : {}", balance.kitty.amount);
                info!("USDT    : {}", balance.usdt.amount);
                Some(balance)
            }
            None => {
                warn!("未获取到余额");
                None
            }
        }
    }

    /// 逐层领取所有蛋，返回 (尝试数, 成功数)
    pub async fn claim_eggs(&self, token: &str) -> (u32, u32) {
        info!("处理蛋...");

        let mut attempted = 0;
        let mut claimed = 0;

        for &floor in &self.config.floors {
            let scenes = match self.api.get_scene_info(token, floor).await.and_then(|r| r.data) {
                Some(scenes) if !scenes.is_empty() => scenes,
                _ => {
                    warn!("第 {} 层没有场景", floor);
                    continue;
                }
            };

            for scene in &scenes {
                let eggs = scene.eggs();
                if eggs.is_empty() {
                    warn!("第 {} 层场景 {} 没有可领取的蛋", floor, scene.label());
                    continue;
                }

                for uid in eggs.iter().filter_map(|egg| egg.uid.as_ref()) {
                    attempted += 1;
                    match self.api.claim_egg_reward(token, uid).await.and_then(|r| r.data) {
                        Some(reward) => {
                            claimed += 1;
                            let amount = reward
                                .amount
                                .map_or_else(|| "0".to_string(), |a| a.to_string());
                            info!("第 {} 层蛋 {} 领取 {}", floor, uid, amount);
                        }
                        None => warn!("第 {} 层蛋 {} 领取失败", floor, uid),
                    }
                }
            }
        }

        (attempted, claimed)
    }

    /// 完整处理一个账号。只有登录失败才返回错误
    pub async fn process(&self, init_data: &str) -> Result<AccountSummary> {
        let token = self.login(init_data).await?;

        let invites_claimed = self.claim_invites(&token).await;
        let balance = self.fetch_balance(&token).await;
        let (eggs_attempted, eggs_claimed) = self.claim_eggs(&token).await;

        Ok(AccountSummary {
            invites_claimed,
            eggs_attempted,
            eggs_claimed,
            balance,
        })
    }
}
