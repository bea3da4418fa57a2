use anyhow::Result;
use extras_cli::config::load_config;
use extras_cli::iban_cmd::{self, IbanCli};
use extras_cli::logging::init_tracing;
use extras_cli::parse_args_or_exit;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli: IbanCli = parse_args_or_exit();

    let cfg = load_config()?;
    init_tracing(&cfg.log.filter);

    let ok = iban_cmd::run(&cli.command, &mut std::io::stdout().lock())?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
