use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use voxbox_sandbox::{SandboxConfig, Session};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut script_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "--script" if i + 1 >= args.len() => {
                eprintln!("{} needs a path", args[i]);
                process::exit(2);
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(&args[i]));
            }
            "--script" => {
                i += 1;
                script_path = Some(PathBuf::from(&args[i]));
            }
            "--print-config" => {
                let pretty = ron::ser::PrettyConfig::default();
                match ron::ser::to_string_pretty(&SandboxConfig::default(), pretty) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        log::error!("Failed to serialize default config: {e}");
                        process::exit(1);
                    }
                }
                process::exit(0);
            }
            "--help" | "-h" => {
                eprintln!("Usage: voxbox [OPTIONS]");
                eprintln!("  --config <path>   Load sandbox settings from a RON file");
                eprintln!("  --script <path>   Read commands from a file (default: stdin)");
                eprintln!("  --print-config    Print the default config and exit");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(2);
            }
        }
        i += 1;
    }

    let config = match &config_path {
        Some(path) => match SandboxConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                process::exit(1);
            }
        },
        None => SandboxConfig::default(),
    };
    let base_dir = config_path.as_deref().and_then(|p| p.parent());

    let mut session = match Session::from_config(&config, base_dir) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Startup failed: {e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match &script_path {
        Some(path) => match File::open(path) {
            Ok(file) => session.run(BufReader::new(file), &mut out),
            Err(e) => {
                log::error!("Failed to open script {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => session.run(io::stdin().lock(), &mut out),
    };

    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}
