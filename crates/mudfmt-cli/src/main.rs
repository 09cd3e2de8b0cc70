//! mudfmt 命令列工具
//!
//! 將標記文字轉為客戶端輸出，方便在終端機預覽

mod config;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mudfmt::{strip_ansi, ConfigError, FormatError, Formatter};
use thiserror::Error;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 命令列錯誤
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("IO 錯誤: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "mudfmt", version, about = "MUD 標記文字格式化工具")]
struct Cli {
    /// 設定檔路徑（預設為 <config_dir>/mudfmt/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 格式化文字；沒有參數時逐行讀取 stdin
    Format {
        /// 移除 ANSI 控制序列
        #[arg(long)]
        plain: bool,
        text: Vec<String>,
    },
    /// 以角色名稱解析動作字串
    Pose {
        /// 移除 ANSI 控制序列
        #[arg(long)]
        plain: bool,
        name: String,
        text: String,
    },
    /// 建立預設設定檔
    InitConfig,
}

fn main() -> ExitCode {
    // 初始化日誌（輸出到 stderr，避免混入格式化結果）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.config.unwrap_or_else(config::default_config_path);

    match cli.command {
        Command::InitConfig => config::write_default(&path)?,
        Command::Format { plain, text } => {
            let settings = config::load_or_default(&path)?;
            let formatter = Formatter::new(settings.lines);
            let mut out = io::stdout().lock();

            if text.is_empty() {
                for line in io::stdin().lock().lines() {
                    emit(&mut out, &formatter.format_client_output(&line?)?, plain)?;
                }
            } else {
                emit(&mut out, &formatter.format_client_output(&text.join(" "))?, plain)?;
            }
        }
        Command::Pose { plain, name, text } => {
            let settings = config::load_or_default(&path)?;
            let localizer = settings.localizer();
            let formatter = Formatter::new(settings.lines);

            let rendered = formatter.parse_pose(&localizer, &name, &text)?;
            let output = formatter.format_client_output(&rendered)?;
            emit(&mut io::stdout().lock(), &output, plain)?;
        }
    }

    Ok(())
}

/// 輸出結果
fn emit(out: &mut impl Write, output: &str, plain: bool) -> io::Result<()> {
    if plain {
        out.write_all(strip_ansi(output).as_bytes())
    } else {
        out.write_all(output.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_command() {
        let cli = Cli::parse_from(["mudfmt", "format", "--plain", "%xrhi", "there"]);
        match cli.command {
            Command::Format { plain, text } => {
                assert!(plain);
                assert_eq!(text, vec!["%xrhi", "there"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_pose_command_with_config() {
        let cli = Cli::parse_from(["mudfmt", "pose", "Bob", ":waves", "--config", "x.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.json")));
        assert!(matches!(cli.command, Command::Pose { ref name, .. } if name == "Bob"));
    }

    #[test]
    fn test_emit_plain() {
        let mut buf = Vec::new();
        emit(&mut buf, "\x1b[31mred\x1b[0m\n", true).unwrap();
        assert_eq!(buf, b"red\n");
    }

    #[test]
    fn test_emit_raw() {
        let mut buf = Vec::new();
        emit(&mut buf, "\x1b[31mred\x1b[0m\n", false).unwrap();
        assert_eq!(buf, b"\x1b[31mred\x1b[0m\n");
    }
}
