use anyhow::Result;
use extras_cli::config::load_config;
use extras_cli::extract::Pdftotext;
use extras_cli::logging::init_tracing;
use extras_cli::parse_args_or_exit;
use extras_cli::statement_cmd::{self, StatementArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args: StatementArgs = parse_args_or_exit();

    let cfg = load_config()?;
    init_tracing(&cfg.log.filter);

    let extractor = Pdftotext::from_config(&cfg.extract);
    statement_cmd::run(&extractor, &args).await
}
