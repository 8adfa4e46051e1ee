use mastermind::cli::{CliInterface, parse_cli};
use mastermind::logging::{self, LogTarget};
use mastermind::random::RngSource;
use mastermind::session::game_loop;
use mastermind::tui::TuiInterface;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    let target = if cli.tui {
        LogTarget::CacheFile
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = logging::init(target, cli.verbose) {
        eprintln!("Failed to set up logging: {e}");
    }

    let config = cli.game_config();
    let mode = cli.game_mode();
    let mut source = match cli.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::new(),
    };

    let result = if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&config, mode, &mut interface, &mut source),
            Err(e) => {
                eprintln!("Failed to start the terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&config, mode, &mut interface, &mut source)
    };

    match result {
        Ok(outcomes) => {
            log::info!("session finished after {} game(s)", outcomes.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("session aborted: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
