//! daily-report: one end-to-end run of the M&A disclosure report.
//!
//! Fetches today's disclosures, normalizes and filters them, renders the
//! HTML/PDF report, delivers the files over the WeCom webhook, and always
//! finishes with a status notification.
//!
//! Usage:
//!   cargo run -p daily-report
//!   cargo run -p daily-report -- --date 2025-06-01

use anyhow::Context;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use eastmoney_client::EastmoneyClient;
use report_core::{analyze, RecordProcessor};
use report_render::{PdfConverter, RenderError, ReportGenerator};
use wecom_notifier::{NotifyError, RunStatus, WecomNotifier};

/// How one run ended, short of an error.
#[derive(Debug)]
enum RunOutcome {
    /// The feed returned nothing (or was unreachable).
    NoRawData,
    /// Records arrived but none matched the target date.
    NoMatchingRows,
    /// All artifacts were generated and delivered.
    Delivered { files: usize },
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("report generation failed: {0}")]
    ReportGeneration(#[from] RenderError),
    #[error("delivery failed for {path}: {source}")]
    Delivery {
        path: PathBuf,
        #[source]
        source: NotifyError,
    },
}

struct AppConfig {
    webhook_url: String,
    output_dir: PathBuf,
    wkhtmltopdf_path: String,
}

impl AppConfig {
    fn from_env() -> anyhow::Result<Self> {
        let webhook_url = std::env::var("WECOM_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .context("WECOM_WEBHOOK_URL must be set")?;

        let output_dir = std::env::var("REPORT_OUTPUT_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let wkhtmltopdf_path = std::env::var("WKHTMLTOPDF_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "wkhtmltopdf".to_string());

        Ok(Self { webhook_url, output_dir, wkhtmltopdf_path })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_report=info,report_core=info,eastmoney_client=info,report_render=info,wecom_notifier=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let notifier = WecomNotifier::new(config.webhook_url.clone());

    let args: Vec<String> = std::env::args().collect();
    let target_date = match target_date_from_args(&args) {
        Ok(date) => date,
        Err(e) => {
            tracing::error!("无法解析目标日期: {}", e);
            notify(&notifier, RunStatus::Failure, &format!("任务执行出错: {}", e)).await;
            return Ok(());
        }
    };

    tracing::info!("===== 生成并发送并购重组报告: {} =====", target_date);

    let result = run(&config, &notifier, target_date).await;
    let (status, message) = status_for(&result);
    notify(&notifier, status, &message).await;

    match &result {
        Ok(outcome) => tracing::info!("===== 任务执行完成: {:?} =====", outcome),
        Err(e) => tracing::error!("任务失败: {}", e),
    }
    Ok(())
}

/// One report run. Fetch degradation and empty feeds are outcomes, not
/// errors; only generation and delivery can fail the run.
async fn run(
    config: &AppConfig,
    notifier: &WecomNotifier,
    target_date: NaiveDate,
) -> Result<RunOutcome, RunError> {
    let feed = EastmoneyClient::new();
    let raw = feed.fetch().await;
    if raw.is_empty() {
        return Ok(RunOutcome::NoRawData);
    }

    let processor = RecordProcessor::new(target_date);
    let data = processor.process(&raw);
    if data.rows.is_empty() {
        return Ok(RunOutcome::NoMatchingRows);
    }

    let analysis = analyze(&data);

    let generator = ReportGenerator::new(
        config.output_dir.clone(),
        PdfConverter::new(config.wkhtmltopdf_path.clone()),
    );
    let artifacts = generator.generate(&data.rows, &analysis, target_date).await?;

    for path in &artifacts {
        if let Err(source) = notifier.send_file(path).await {
            return Err(RunError::Delivery { path: path.clone(), source });
        }
    }

    Ok(RunOutcome::Delivered { files: artifacts.len() })
}

/// Target date: `--date %Y-%m-%d` when given, today (CN local) otherwise.
fn target_date_from_args(args: &[String]) -> anyhow::Result<NaiveDate> {
    match args.iter().position(|a| a == "--date") {
        Some(i) => {
            let value = args
                .get(i + 1)
                .context("--date requires a value (format: %Y-%m-%d)")?;
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .with_context(|| format!("invalid --date value: {}", value))
        }
        None => Ok(Local::now().date_naive()),
    }
}

/// Map the run result onto the notification the robot posts.
fn status_for(result: &Result<RunOutcome, RunError>) -> (RunStatus, String) {
    match result {
        Ok(RunOutcome::NoRawData) => {
            (RunStatus::Success, "未获取到原始数据，任务正常结束".to_string())
        }
        Ok(RunOutcome::NoMatchingRows) => {
            (RunStatus::Success, "今日无相关数据，任务正常结束".to_string())
        }
        Ok(RunOutcome::Delivered { files }) => (
            RunStatus::Success,
            format!("报告生成并发送成功，共发送{}个文件", files),
        ),
        Err(RunError::ReportGeneration(_)) => (RunStatus::Failure, "报告生成失败".to_string()),
        Err(RunError::Delivery { path, .. }) => (
            RunStatus::Failure,
            format!("文件发送失败: {}", path.display()),
        ),
    }
}

/// Status delivery is best-effort; a webhook hiccup must not fail the run.
async fn notify(notifier: &WecomNotifier, status: RunStatus, message: &str) {
    if let Err(e) = notifier.send_status(status, message).await {
        tracing::warn!("状态通知发送失败: {}", e);
    }
}
