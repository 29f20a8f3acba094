use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use markout::Converter;

mod cli;
use cli::{Cli, Commands};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: Option<&PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn converter_for(cli: &Cli, input_path: Option<&PathBuf>) -> io::Result<Converter> {
    let start_dir = start_dir_for(input_path)?;
    let (cfg, cfg_path) = markout::config::load(cli.config.as_deref(), &start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }

    Ok(Converter::new(cli.overrides.apply(cfg)))
}

fn render_file(converter: &Converter, path: &Path) -> io::Result<String> {
    let input = fs::read_to_string(path)?;
    converter
        .render(&input)
        .map_err(|e| io::Error::other(format!("{}: {e}", path.display())))
}

#[cfg(not(target_arch = "wasm32"))]
fn render_files(converter: &Converter, files: &[PathBuf]) -> Vec<io::Result<String>> {
    use rayon::prelude::*;

    files.par_iter().map(|p| render_file(converter, p)).collect()
}

#[cfg(target_arch = "wasm32")]
fn render_files(converter: &Converter, files: &[PathBuf]) -> Vec<io::Result<String>> {
    files.iter().map(|p| render_file(converter, p)).collect()
}

fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    dir.join(format!("{}.html", stem.to_string_lossy()))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match &cli.command {
        Commands::Render { files, output } => {
            let converter = converter_for(&cli, files.first())?;

            if files.is_empty() {
                let input = read_all(None)?;
                let html = converter.render(&input).map_err(io::Error::other)?;
                print!("{html}");
                return Ok(());
            }

            if let Some(dir) = output {
                fs::create_dir_all(dir)?;
            }

            let mut failed = false;
            for (path, result) in files.iter().zip(render_files(&converter, files)) {
                match result {
                    Ok(html) => match output {
                        Some(dir) => {
                            let target = output_path(dir, path);
                            fs::write(&target, html)?;
                            println!("Rendered {} -> {}", path.display(), target.display());
                        }
                        None => print!("{html}"),
                    },
                    Err(e) => {
                        eprintln!("Error: {e}");
                        failed = true;
                    }
                }
            }

            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Tokens { file } => {
            let converter = converter_for(&cli, file.as_ref())?;
            let input = read_all(file.as_ref())?;
            let report = converter.debug(&input).map_err(io::Error::other)?;
            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            println!("{json}");
            Ok(())
        }
    }
}
