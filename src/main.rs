//! CLI entry point: one subcommand per report variant.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use retrospect::error::AnalysisError;
use retrospect::keywords::{CharClassTokenizer, Renderer, TokenTextRenderer};
use retrospect::pipeline;

#[derive(Parser)]
#[command(name = "retrospect", version, about = "Slack履歴の振り返り分析レポートを生成")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// KPT分析レポート（感情分析・キーワード付き）
    Kpt {
        input: PathBuf,
        #[arg(short, long, default_value = "kpt_report.md")]
        output: PathBuf,
    },
    /// ネガティブ発言の詳細レポート
    Negative {
        input: PathBuf,
        #[arg(short, long, default_value = "negative_report.md")]
        output: PathBuf,
    },
    /// カテゴリ別ネガティブ発言の要約
    NegativeSummary {
        input: PathBuf,
        #[arg(short, long, default_value = "negative_summary.md")]
        output: PathBuf,
    },
    /// カテゴリ別ネガティブ発言リスト
    NegativeList {
        input: PathBuf,
        #[arg(short, long, default_value = "negative_list.md")]
        output: PathBuf,
    },
    /// カテゴリ別ポジティブ発言リスト
    PositiveList {
        input: PathBuf,
        #[arg(short, long, default_value = "positive_list.md")]
        output: PathBuf,
    },
    /// ワードクラウド用トークン出力
    Wordcloud {
        input: PathBuf,
        #[arg(short, long, default_value = "wordcloud.txt")]
        output: PathBuf,
    },
}

/// Read the input document, distinguishing unreadable files from files
/// that are not valid UTF-8.
fn read_document(path: &Path) -> Result<String, AnalysisError> {
    let bytes = fs::read(path).map_err(|source| AnalysisError::io(path, source))?;
    String::from_utf8(bytes).map_err(|_| AnalysisError::Encoding {
        path: path.to_path_buf(),
    })
}

fn write_report(path: &Path, contents: &str) -> Result<(), AnalysisError> {
    fs::write(path, contents).map_err(|source| AnalysisError::io(path, source))
}

fn timestamp() -> Option<String> {
    Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Kpt { input, output } => {
            let document = read_document(&input)?;
            let report = pipeline::kpt_report(&document, &CharClassTokenizer, timestamp())?;
            write_report(&output, &report)?;
            println!("KPT分析レポートを生成しました: {}", output.display());
        }
        Command::Negative { input, output } => {
            let document = read_document(&input)?;
            let report = pipeline::negative_report(&document, timestamp())?;
            write_report(&output, &report)?;
            println!("ネガティブ発言分析レポートを生成しました: {}", output.display());
        }
        Command::NegativeSummary { input, output } => {
            let document = read_document(&input)?;
            let report = pipeline::negative_summary(&document, timestamp())?;
            write_report(&output, &report)?;
            println!("ネガティブ発言の要約を生成しました: {}", output.display());
        }
        Command::NegativeList { input, output } => {
            let document = read_document(&input)?;
            let report = pipeline::negative_list(&document, timestamp())?;
            write_report(&output, &report)?;
            println!("ネガティブ発言リストを生成しました: {}", output.display());
        }
        Command::PositiveList { input, output } => {
            let document = read_document(&input)?;
            let report = pipeline::positive_list(&document, timestamp())?;
            write_report(&output, &report)?;
            println!("ポジティブ発言リストを生成しました: {}", output.display());
        }
        Command::Wordcloud { input, output } => {
            let document = read_document(&input)?;
            let tokens = pipeline::wordcloud_tokens(&document, &CharClassTokenizer);
            TokenTextRenderer.render(&tokens, &output)?;
            info!(tokens = tokens.split_whitespace().count(), "rendered token stream");
            println!("ワードクラウドを生成しました: {}", output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("エラー: {err:#}");
            ExitCode::FAILURE
        }
    }
}
