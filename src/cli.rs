use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use ruload::config::{ConfigLoader, LoadConfig, RunSettings};
use ruload::http::Url;
use ruload::metrics::ErrorRate;
use ruload::runner::{LoadOptions, RunReporter, RunSummary, ScenarioRunner, run_load};
use ruload::scenario::inventory_plan;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 目标 base URL（如 localhost:8000/api），缺省时取配置文件
    pub base_url: Option<String>,

    /// 并发虚拟用户数
    #[arg(short, long)]
    pub users: Option<usize>,

    /// 每个虚拟用户的迭代次数
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// 压测时长上限（秒）
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// 迭代之间的固定停顿（毫秒）
    #[arg(long)]
    pub pause_ms: Option<u64>,

    /// 配置文件中的环境名称
    #[arg(short, long)]
    pub env: Option<String>,

    /// 配置文件路径（缺省时自动查找 ruload.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 覆盖配置项（--var key=value，可重复）
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Bearer token（覆盖配置文件中的 bearer_token）
    #[arg(long)]
    pub token: Option<String>,

    /// 输出每个步骤和检查的详细结果
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    // 加载配置并合并 CLI 覆盖
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::find_and_load().unwrap_or_else(LoadConfig::default),
    };

    let cli_vars: Vec<(String, String)> = cli
        .vars
        .iter()
        .filter_map(|v| ConfigLoader::parse_cli_var(v))
        .collect();

    let settings_map = ConfigLoader::build_settings(&config, cli.env.as_deref(), &cli_vars);
    let settings = RunSettings::from_map(&settings_map);

    let base_url_str = cli
        .base_url
        .or(settings.base_url)
        .ok_or_else(|| anyhow::anyhow!("base URL is required (argument or config)"))?;
    let base_url = Url::parse(&base_url_str)?;

    let bearer_token = cli.token.or(settings.bearer_token);

    let options = LoadOptions {
        users: cli.users.or(settings.users).unwrap_or(1),
        iterations: cli.iterations.or(settings.iterations),
        duration: cli
            .duration
            .or(settings.duration_secs)
            .map(Duration::from_secs),
    };
    let pause = Duration::from_millis(cli.pause_ms.or(settings.pause_ms).unwrap_or(1000));

    let signal = Arc::new(ErrorRate::new());
    let runner = Arc::new(
        ScenarioRunner::new(inventory_plan(), signal.clone())
            .with_bearer_token(bearer_token)
            .with_pause(pause),
    );

    let reporter = RunReporter::new(cli.verbose);
    reporter.print_header(&base_url.to_string(), options.users);

    let start = Instant::now();
    let reports = run_load(runner, base_url, options).await;
    let wall_clock = start.elapsed();

    for report in &reports {
        reporter.print_iteration(report);
    }

    let summary = RunSummary::from_reports(&reports, wall_clock);
    reporter.print_summary(&summary, &signal);

    Ok(())
}
