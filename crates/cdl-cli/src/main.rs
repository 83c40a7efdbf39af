use cdl_core::config::LogConfig;
use cdl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse_args();

    // Config comes first: it decides where logs go.
    let cfg = match cli.load_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            logging::init_logging_stderr(&LogConfig::default());
            exit_with(err);
        }
    };

    if cli.log_stderr || logging::init_logging(&cfg.log).is_err() {
        logging::init_logging_stderr(&cfg.log);
    }

    if let Err(err) = cli.run(cfg) {
        exit_with(err);
    }
}

fn exit_with(err: anyhow::Error) -> ! {
    tracing::error!("{:#}", err);
    eprintln!("cdl error: {:#}", err);
    std::process::exit(1);
}
