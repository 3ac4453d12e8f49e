use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::{error, info};
use vgacpu_asm::cli::{Cli, run};

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      // --help and --version also land here
      let _ = e.print();
      return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
    }
  };

  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
    .format_timestamp(None)
    .init();

  match run(&cli) {
    Ok(summary) => {
      info!("{}", summary);
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!("{}", e);
      ExitCode::FAILURE
    }
  }
}
