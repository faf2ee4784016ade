use anyhow::{Context, Result, anyhow};
use log::{debug, error};
use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN, REFERER,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

use crate::api::{
    ApiResponse, BalanceResponse, ClaimResponse, EggRewardResponse, InviteListResponse,
    LoginResponse, RecordId, SceneInfoResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://kitty-api.bfp72q.com";
pub const DEFAULT_ORIGIN: &str = "https://kitty-web.bfp72q.com";

const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 13; SM-P610) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.6618.139 Mobile Safari/537.36";

/// 领奖接口。账号处理器只依赖这个 trait，网络错误在实现内部记录并转换为 `None`
#[allow(async_fn_in_trait)]
pub trait RewardApi {
    async fn login(&self, init_data: &str) -> Option<LoginResponse>;

    async fn list_invites(&self, token: &str, start_id: &str, size: u32)
    -> Option<InviteListResponse>;

    async fn claim_invite(&self, token: &str, invite_id: &RecordId) -> Option<ClaimResponse>;

    async fn get_scene_info(&self, token: &str, floor: u32) -> Option<SceneInfoResponse>;

    async fn claim_egg_reward(&self, token: &str, egg_uid: &RecordId)
    -> Option<EggRewardResponse>;

    async fn get_balance(&self, token: &str) -> Option<BalanceResponse>;
}

/// HTTP客户端，封装了与 Kitty 接口的所有交互。
///
/// 每个实例持有独立的连接池和 cookie，一个账号处理期间复用同一个实例。
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// 创建新的HTTP客户端实例
    pub fn new(base_url: &str, origin: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers(origin)?)
            .cookie_store(true)
            .build()
            .context("创建HTTP客户端失败")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        authorization: Option<&str>,
    ) -> Result<ApiResponse<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("请求: {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = authorization {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!("响应 {}: {}", path, body);

        let parsed: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|e| anyhow!("解析响应失败 {}: {}, body: {}", path, e, body))?;

        Ok(parsed)
    }

    /// 使用 init_data 登录
    pub async fn try_login(&self, init_data: &str) -> Result<LoginResponse> {
        self.post("/api/login/tg", &json!({ "init_data": init_data }), None)
            .await
    }

    /// 获取邀请列表
    pub async fn try_list_invites(
        &self,
        token: &str,
        start_id: &str,
        size: u32,
    ) -> Result<InviteListResponse> {
        let body = json!({ "token": token, "start_id": start_id, "size": size });
        self.post("/api/invite/list", &body, None).await
    }

    /// 领取邀请奖励
    pub async fn try_claim_invite(&self, token: &str, invite_id: &RecordId) -> Result<ClaimResponse> {
        let body = json!({ "token": token, "invite_id": invite_id });
        self.post("/api/invite/reward", &body, None).await
    }

    /// 获取指定楼层的场景和蛋
    pub async fn try_get_scene_info(&self, token: &str, floor: u32) -> Result<SceneInfoResponse> {
        let body = json!({ "token": token, "floor": floor });
        self.post("/api/scene/info", &body, Some(token)).await
    }

    pub async fn try_claim_egg_reward(
        &self,
        token: &str,
        egg_uid: &RecordId,
    ) -> Result<EggRewardResponse> {
        let body = json!({ "token": token, "egg_uid": egg_uid });
        self.post("/api/scene/egg/reward", &body, Some(token)).await
    }

    /// 获取账户资产
    pub async fn try_get_balance(&self, token: &str) -> Result<BalanceResponse> {
        self.post("/api/user/assets", &json!({ "token": token }), Some(token))
            .await
    }
}

impl RewardApi for HttpClient {
    async fn login(&self, init_data: &str) -> Option<LoginResponse> {
        self.try_login(init_data)
            .await
            .map_err(|e| error!("登录请求失败: {:#}", e))
            .ok()
    }

    async fn list_invites(
        &self,
        token: &str,
        start_id: &str,
        size: u32,
    ) -> Option<InviteListResponse> {
        self.try_list_invites(token, start_id, size)
            .await
            .map_err(|e| error!("获取邀请列表失败: {:#}", e))
            .ok()
    }

    async fn claim_invite(&self, token: &str, invite_id: &RecordId) -> Option<ClaimResponse> {
        self.try_claim_invite(token, invite_id)
            .await
            .map_err(|e| error!("领取邀请 {} 失败: {:#}", invite_id, e))
            .ok()
    }

    async fn get_scene_info(&self, token: &str, floor: u32) -> Option<SceneInfoResponse> {
        self.try_get_scene_info(token, floor)
            .await
            .map_err(|e| error!("获取第 {} 层场景失败: {:#}", floor, e))
            .ok()
    }

    async fn claim_egg_reward(&self, token: &str, egg_uid: &RecordId) -> Option<EggRewardResponse> {
        self.try_claim_egg_reward(token, egg_uid)
            .await
            .map_err(|e| error!("领取蛋 {} 失败: {:#}", egg_uid, e))
            .ok()
    }

    async fn get_balance(&self, token: &str) -> Option<BalanceResponse> {
        self.try_get_balance(token)
            .await
            .map_err(|e| error!("获取余额失败: {:#}", e))
            .ok()
    }
}

/// 固定请求头，授权头按接口单独附加
fn default_headers(origin: &str) -> Result<HeaderMap> {
    let origin = origin.trim_end_matches('/');
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en,en-GB;q=0.9,en-US;q=0.8"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ORIGIN,
        HeaderValue::from_str(origin).with_context(|| format!("无效的 origin: {}", origin))?,
    );
    headers.insert(
        REFERER,
        HeaderValue::from_str(&format!("{}/", origin))
            .with_context(|| format!("无效的 origin: {}", origin))?,
    );
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    Ok(headers)
}
