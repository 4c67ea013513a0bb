use std::{env, fs, process::ExitCode, sync::Once, time::Instant};

use dfunc::{
    config::{Config, ConfigError, USAGE},
    display_error,
    pipeline::{parse_sources, run_program, PRELUDE, PRELUDE_FILE},
};
use tracing::info;

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber filtered by `RUST_LOG`. Without `RUST_LOG` nothing
/// is installed and logging stays silent.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            return;
        }

        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .init();
    });
}

fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            eprintln!("error: {}\n{}", error, USAGE);
            return ExitCode::from(2);
        }
    };

    let mut sources = vec![];
    if config.prelude {
        sources.push((PRELUDE_FILE.to_string(), PRELUDE.to_string()));
    }
    for path in &config.files {
        match fs::read_to_string(path) {
            Ok(source) => sources.push((path.display().to_string(), source)),
            Err(error) => {
                eprintln!("error: failed to read {}: {}", path.display(), error);
                return ExitCode::FAILURE;
            }
        }
    }

    let start = Instant::now();

    let program = match parse_sources(&sources) {
        Ok(program) => program,
        Err(error) => {
            eprint!("{}", display_error(&error, &sources));
            return ExitCode::FAILURE;
        }
    };
    info!(elapsed = ?start.elapsed(), functions = program.declarations.len(), "parsed");

    let run_start = Instant::now();
    let result = run_program(&program, &config);
    info!(elapsed = ?run_start.elapsed(), total = ?start.elapsed(), "finished");

    match result {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", display_error(&error, &sources));
            ExitCode::FAILURE
        }
    }
}
