//! extras-cli: command-line glue for the statement parser (`extras`) and the IBAN
//! tool (`iban`).

use clap::{CommandFactory, Parser};

pub mod config;
pub mod extract;
pub mod iban_cmd;
pub mod logging;
pub mod statement_cmd;

/// Parse argv. A bare invocation and `-h`/`-V` print to stdout and exit 0; any other
/// argument error goes to stderr with exit 1.
pub fn parse_args_or_exit<P: Parser>() -> P {
    if std::env::args_os().len() <= 1 {
        let mut cmd = P::command();
        let _ = cmd.print_help();
        println!();
        std::process::exit(0);
    }

    match P::try_parse() {
        Ok(p) => p,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
