//! # TextKit
//!
//! Command-line entry point for the text tool.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use text_core::{parse_action, CaseConversion, CountUnit};
use textkitd::{HostMode, HostRuntime, HostRuntimeConfig, InputSource};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("textkit");

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to start: {}", e);
        process::exit(1);
    });

    let stdout = io::stdout();
    let stderr = io::stderr();
    if let Err(e) = runtime.run(&mut stdout.lock(), &mut stderr.lock()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    let mut transform = None;
    let mut input = None;
    let mut script = None;
    let mut settings_path = None;
    let mut export_dir = None;
    let mut count_unit = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--transform" | "-t" => {
                let name = value_for(args, &mut i, "--transform")?;
                transform = Some(parse_action(name).map_err(|e| e.to_string())?);
            }
            "--input" | "-i" => {
                input = Some(PathBuf::from(value_for(args, &mut i, "--input")?));
            }
            "--script" | "-s" => {
                let script_path = value_for(args, &mut i, "--script")?;
                let script_text = fs::read_to_string(script_path)
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                script = Some(script_text);
            }
            "--config" | "-c" => {
                settings_path = Some(PathBuf::from(value_for(args, &mut i, "--config")?));
            }
            "--export-dir" => {
                export_dir = Some(PathBuf::from(value_for(args, &mut i, "--export-dir")?));
            }
            "--count-unit" => {
                let name = value_for(args, &mut i, "--count-unit")?;
                count_unit = Some(
                    CountUnit::from_name(name)
                        .ok_or_else(|| format!("Invalid count unit: {}", name))?,
                );
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    let mode = match (transform, script) {
        (Some(_), Some(_)) => return Err("--transform and --script are exclusive".to_string()),
        (Some(action), None) => HostMode::OneShot {
            action,
            input: input.map_or(InputSource::Stdin, InputSource::File),
        },
        (None, Some(text)) => {
            if input.is_some() {
                return Err("--input only applies to --transform".to_string());
            }
            HostMode::Script(text)
        }
        (None, None) => return Err("Nothing to do: pass --transform or --script".to_string()),
    };

    let mut config = HostRuntimeConfig::new(mode);
    config.settings_path = settings_path;
    config.export_dir = export_dir;
    config.count_unit = count_unit;
    Ok(config)
}

fn value_for<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn print_usage(program: &str) {
    let conversions: Vec<&str> = CaseConversion::ALL.iter().map(|c| c.name()).collect();

    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --transform <ACTION>  Apply one action to the input and print the result");
    eprintln!("  -i, --input <FILE>        Input file for --transform (default: stdin)");
    eprintln!("  -s, --script <FILE>       Replay a session script");
    eprintln!("  -c, --config <FILE>       Settings overrides (JSON)");
    eprintln!("  --export-dir <DIR>        Write downloads here (default: keep in memory)");
    eprintln!("  --count-unit <UNIT>       chars (default), utf16 or graphemes");
    eprintln!("  -h, --help                Show this help message");
    eprintln!();
    eprintln!("Actions:");
    eprintln!("  {}", conversions.join(", "));
    eprintln!("  count, copy, download, clear");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  echo 'the lord of the rings' | {} --transform title", program);
    eprintln!("  {} --script demos/heading.tkscript --export-dir out", program);
    eprintln!();
    eprintln!("Set RUST_LOG=debug for per-action logging.");
}
