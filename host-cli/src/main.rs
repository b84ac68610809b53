//! # tagcalc
//!
//! 标签式算术表达式分析器命令行入口。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- analyze input.txt
//! cargo run -p host-cli -- analyze input.txt --format json --tokens
//! cargo run -p host-cli -- --config tagcalc.json analyze -
//! cargo run -p host-cli -- tokens input.txt
//! ```

use std::process::ExitCode;

use clap::Parser;
use host_cli::cli::{Cli, Commands, apply_overrides};
use host_cli::config::AppConfig;
use host_cli::{read_input, render_analysis, render_scan, run_analysis};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 日志级别依赖配置文件，先加载配置再安装 subscriber，加载结果在安装后补记
    let loaded = AppConfig::load_with_source(&cli.config);
    let configured = loaded
        .as_ref()
        .map(|(config, _)| config.log_level)
        .unwrap_or_default();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level(configured))
        .with_writer(std::io::stderr)
        .init();

    let result = loaded.and_then(|(config, source)| {
        source.log(&cli.config);
        real_main(cli, config)
    });
    if let Err(e) = result {
        error!("{e:#}");
        eprintln!("tagcalc error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Analyze {
            input,
            max_depth,
            format,
            tokens,
        } => {
            let config = apply_overrides(config, max_depth, format, tokens);
            config.validate()?;

            let text = read_input(&input)?;
            let analysis = run_analysis(&text, &config)?;
            print!("{}", render_analysis(&analysis, &config)?);
        }
        Commands::Tokens { input } => {
            let text = read_input(&input)?;
            print!("{}", render_scan(&calc_core::scan(&text)));
        }
    }

    Ok(())
}
