use hrsleep::{BenchRunner, BenchSettings, BenchSettingsManager, SleepError, SleepResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> SleepResult<Args> {
    let mut args = Args {
        config: None,
        json: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--config" => {
                let path = iter.next().ok_or_else(|| {
                    SleepError::InvalidInput("--config requires a path".to_string())
                })?;
                args.config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("usage: hrsleep-bench [--config <settings.json>] [--json]");
                std::process::exit(0);
            }
            other => {
                return Err(SleepError::InvalidInput(format!(
                    "unknown argument: {}",
                    other
                )));
            }
        }
    }

    Ok(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> SleepResult<()> {
    init_tracing();

    let args = parse_args()?;

    let settings = match &args.config {
        Some(path) => BenchSettingsManager::new_with_path(path.clone()).load()?,
        None => BenchSettings::default(),
    };

    let report = BenchRunner::new(settings)?.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
