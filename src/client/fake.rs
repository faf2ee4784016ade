use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use crate::api::{
    BalanceResponse, ClaimResponse, EggRewardResponse, InviteListResponse, LoginResponse,
    RecordId, SceneInfoResponse,
};
use crate::client::RewardApi;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Login(String),
    ListInvites,
    ClaimInvite(RecordId),
    SceneInfo(u32),
    ClaimEgg(RecordId),
    Balance,
}

/// 按脚本应答的接口替身，所有克隆共享同一份调用记录
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    pub login: Option<Value>,
    pub invites: Option<Value>,
    pub rejected_invites: HashSet<i64>,
    pub scenes: HashMap<u32, Value>,
    pub balance: Option<Value>,
    /// 这些凭证登录时返回无结果
    pub bad_credentials: HashSet<String>,
    pub calls: Arc<Mutex<Vec<(Instant, Call)>>>,
}

impl FakeApi {
    pub fn logged_in() -> Self {
        Self {
            login: Some(json!({ "code": 0, "data": { "token": { "token": "tok" } } })),
            ..Self::default()
        }
    }

    pub fn with_invites(mut self, count: i64) -> Self {
        let list: Vec<Value> = (1..=count).map(|id| json!({ "id": id })).collect();
        self.invites = Some(json!({ "code": 0, "data": list }));
        self
    }

    pub fn rejecting(mut self, ids: &[i64]) -> Self {
        self.rejected_invites.extend(ids);
        self
    }

    /// 为某层设置场景，每个元素是该场景的蛋数量
    pub fn with_scenes(mut self, floor: u32, egg_counts: &[usize]) -> Self {
        let scenes: Vec<Value> = egg_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let eggs: Vec<Value> = (0..count)
                    .map(|n| json!({ "uid": format!("egg-{}-{}-{}", floor, i, n) }))
                    .collect();
                json!({ "id": i, "eggs": eggs })
            })
            .collect();
        self.scenes
            .insert(floor, json!({ "code": 0, "data": scenes }));
        self
    }

    pub fn with_balance(mut self) -> Self {
        self.balance = Some(json!({
            "code": 0,
            "data": {
                "diamond": { "amount": 10 },
                "kitty": { "amount": 2.5 },
                "usdt": { "amount": "0.01" }
            }
        }));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }
}

/// 与 HttpClient 一致：解码失败视为无结果
fn decode<T: serde::de::DeserializeOwned>(value: &Option<Value>) -> Option<T> {
    value
        .as_ref()
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

impl RewardApi for FakeApi {
    async fn login(&self, init_data: &str) -> Option<LoginResponse> {
        self.record(Call::Login(init_data.to_string()));
        if self.bad_credentials.contains(init_data) {
            return None;
        }
        decode(&self.login)
    }

    async fn list_invites(
        &self,
        _token: &str,
        _start_id: &str,
        _size: u32,
    ) -> Option<InviteListResponse> {
        self.record(Call::ListInvites);
        decode(&self.invites)
    }

    async fn claim_invite(&self, _token: &str, invite_id: &RecordId) -> Option<ClaimResponse> {
        self.record(Call::ClaimInvite(invite_id.clone()));
        let rejected = matches!(invite_id, RecordId::Number(n) if self.rejected_invites.contains(n));
        let code = if rejected { 1 } else { 0 };
        decode(&Some(json!({ "code": code, "msg": "", "data": {} })))
    }

    async fn get_scene_info(&self, _token: &str, floor: u32) -> Option<SceneInfoResponse> {
        self.record(Call::SceneInfo(floor));
        decode(&self.scenes.get(&floor).cloned())
    }

    async fn claim_egg_reward(&self, _token: &str, egg_uid: &RecordId) -> Option<EggRewardResponse> {
        self.record(Call::ClaimEgg(egg_uid.clone()));
        decode(&Some(json!({ "code": 0, "data": { "amount": 5 } })))
    }

    async fn get_balance(&self, _token: &str) -> Option<BalanceResponse> {
        self.record(Call::Balance);
        decode(&self.balance)
    }
}
