use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use kitty_claim::accounts::ACCOUNTS_PATH;
use kitty_claim::client::{
    ClaimConfig, DEFAULT_BASE_URL, DEFAULT_ORIGIN, HttpClient, ScheduleConfig, Scheduler,
    Shutdown, StopReason,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Kitty 奖励自动领取工具", long_about = None)]
struct Args {
    #[arg(short, long, default_value = ACCOUNTS_PATH, help = "账号文件，每行一个 init_data")]
    accounts: PathBuf,

    #[arg(long, default_value = DEFAULT_BASE_URL, help = "接口基础URL")]
    server: String,

    #[arg(long, default_value = DEFAULT_ORIGIN, help = "网页端 origin")]
    origin: String,

    #[arg(short = 'l', long, default_value = "20", help = "每个账号每轮邀请领取上限")]
    claim_limit: u32,

    #[arg(long, default_value = "20", help = "邀请列表单页数量")]
    page_size: u32,

    #[arg(long, default_value = "1.0", help = "邀请领取间隔 (秒)")]
    claim_pacing: f64,

    #[arg(long, default_value = "60.0", help = "账号间隔 (秒)")]
    account_delay: f64,

    #[arg(long, default_value = "60.0", help = "轮次间隔 (秒)")]
    cycle_delay: f64,

    #[arg(long, value_delimiter = ',', default_value = "1,2", help = "领取蛋的楼层")]
    floors: Vec<u32>,

    #[arg(long, default_value = "30", help = "请求超时 (秒)")]
    timeout: u64,

    #[arg(long, help = "只执行一轮")]
    once: bool,

    #[arg(short, long, help = "输出调试日志")]
    verbose: bool,
}

fn seconds(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|e| anyhow!("{} 无效 ({}): {}", name, value, e))
}

/// 验证参数
fn validate(args: &Args) -> Result<()> {
    if args.server.trim().is_empty() {
        return Err(anyhow!("服务器地址不能为空"));
    }

    if args.claim_limit == 0 {
        return Err(anyhow!("邀请领取上限必须大于0"));
    }

    if args.page_size == 0 {
        return Err(anyhow!("邀请列表单页数量必须大于0"));
    }

    if args.timeout == 0 {
        return Err(anyhow!("请求超时必须大于0"));
    }

    if args.floors.is_empty() {
        return Err(anyhow!("楼层列表不能为空"));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    validate(&args)?;

    let claim = ClaimConfig {
        claim_limit: args.claim_limit,
        page_size: args.page_size,
        claim_pacing: seconds("--claim-pacing", args.claim_pacing)?,
        floors: args.floors,
    };

    let schedule = ScheduleConfig {
        accounts_path: args.accounts,
        account_delay: seconds("--account-delay", args.account_delay)?,
        cycle_delay: seconds("--cycle-delay", args.cycle_delay)?,
        run_once: args.once,
    };

    let (shutdown_tx, shutdown) = Shutdown::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("收到 Ctrl+C，当前账号处理完后退出");
            let _ = shutdown_tx.send(true);
        }
    });

    let server = args.server;
    let origin = args.origin;
    let timeout = Duration::from_secs(args.timeout);

    let mut scheduler = Scheduler::new(schedule, claim, shutdown);
    let reason = scheduler
        .run(|| HttpClient::new(&server, &origin, timeout))
        .await;

    match reason {
        StopReason::AccountsMissing => info!("账号文件缺失，程序退出"),
        StopReason::Shutdown => info!("已停止"),
        StopReason::Completed => info!("单轮执行完成"),
    }

    Ok(())
}
