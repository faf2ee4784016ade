use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 接口统一响应外壳，`code`/`msg`/`data` 均可能缺失
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 状态码为 0 视为成功
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// 取出 data，缺失时返回格式错误
    pub fn into_data(self) -> Result<T> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(anyhow!(
                "响应格式错误: 缺少 data 字段 (code: {}, msg: {})",
                self.code.map_or_else(|| "null".to_string(), |c| c.to_string()),
                self.msg.as_deref().unwrap_or("")
            )),
        }
    }
}

/// 远端记录标识，服务端可能返回数字或字符串
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 金额，数字或字符串形式
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenInfo {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginData {
    pub token: TokenInfo,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Invite {
    pub id: RecordId,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Egg {
    #[serde(default)]
    pub uid: Option<RecordId>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Scene {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub eggs: Option<Vec<Egg>>,
}

impl Scene {
    pub fn eggs(&self) -> &[Egg] {
        self.eggs.as_deref().unwrap_or(&[])
    }

    pub fn label(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| "?".to_string(), |id| id.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EggReward {
    #[serde(default)]
    pub amount: Option<Amount>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssetAmount {
    pub amount: Amount,
}

/// 余额快照，仅用于展示
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Balance {
    pub diamond: AssetAmount,
    pub kitty: AssetAmount,
    pub usdt: AssetAmount,
}

pub type LoginResponse = ApiResponse<LoginData>;
pub type InviteListResponse = ApiResponse<Vec<Invite>>;
pub type ClaimResponse = ApiResponse<Value>;
pub type SceneInfoResponse = ApiResponse<Vec<Scene>>;
pub type EggRewardResponse = ApiResponse<EggReward>;
pub type BalanceResponse = ApiResponse<Balance>;
