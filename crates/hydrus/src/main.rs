//! hydrus-fetch - download a file or thumbnail from a Hydrus client API
//!
//! Usage: hydrus-fetch [OPTIONS] <FILE_ID|HASH>

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hydrus_api::{ApiConfig, FileIdentifier, FileResponse, GetFilesApi};
use log::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Options {
    identifier: String,
    output: Option<PathBuf>,
    thumbnail: bool,
}

/// What the command line asks for
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Fetch(Options),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("hydrus-fetch");

    match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Help) => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("hydrus-fetch {}", VERSION);
            ExitCode::SUCCESS
        }
        Ok(Command::Fetch(options)) => {
            if let Err(e) = fetch(options).await {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}\n", e);
            print_usage(program);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"hydrus-fetch {} - download files from a Hydrus client API

USAGE:
    {} [OPTIONS] <FILE_ID|HASH>

OPTIONS:
    -h, --help            Print this help message
    -V, --version         Print version information
    -o, --output <PATH>   Write the file to PATH
    -t, --thumbnail       Fetch the thumbnail instead of the file

ENVIRONMENT:
    HYDRUS_API_URL        API address (default http://127.0.0.1:45869/)
    HYDRUS_ACCESS_KEY     Client API access key
    HYDRUS_TIMEOUT_SECS   Request timeout (default 30)
"#,
        VERSION, program
    );
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut identifier = None;
    let mut output = None;
    let mut thumbnail = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--thumbnail" | "-t" => thumbnail = true,
            "--output" | "-o" => {
                let path = iter.next().ok_or_else(|| format!("{} needs a path", arg))?;
                output = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => return Err(format!("Unknown option: {}", other)),
            other => {
                if identifier.replace(other.to_string()).is_some() {
                    return Err("Only one file can be fetched at a time".to_string());
                }
            }
        }
    }

    let identifier = identifier.ok_or_else(|| "Missing FILE_ID or HASH".to_string())?;
    Ok(Command::Fetch(Options {
        identifier,
        output,
        thumbnail,
    }))
}

/// Fetch the requested file and write it to disk
async fn fetch(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let id = FileIdentifier::parse(&options.identifier)?;
    let api = GetFilesApi::new(ApiConfig::from_env()?)?;

    let response = if options.thumbnail {
        api.thumbnail(&id).await?
    } else {
        api.file(&id, false).await?
    };
    let response = response.error_for_status()?;

    let path = options
        .output
        .unwrap_or_else(|| default_output_path(&id, &response, options.thumbnail));

    println!(
        "{} {} ({} bytes)",
        response.status,
        response.content_type().unwrap_or("application/octet-stream"),
        response.len()
    );

    fs::write(&path, &response.content_bytes)?;
    info!("Wrote {}", path.display());
    println!("Saved to {}", path.display());

    Ok(())
}

/// Name from Content-Disposition, else `<id>[.thumb].<ext>`
fn default_output_path(id: &FileIdentifier, response: &FileResponse, thumbnail: bool) -> PathBuf {
    if let Some(name) = response.content_headers.filename() {
        // Never let the server pick a directory
        if let Some(file_name) = Path::new(&name).file_name() {
            return PathBuf::from(file_name);
        }
    }

    let ext = response
        .content_type()
        .map(extension_for)
        .unwrap_or("bin");
    if thumbnail {
        PathBuf::from(format!("{}.thumb.{}", id, ext))
    } else {
        PathBuf::from(format!("{}.{}", id, ext))
    }
}

/// File extension for a MIME type
fn extension_for(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/avif" => "avif",
        "image/svg+xml" => "svg",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/x-matroska" => "mkv",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        "audio/flac" => "flac",
        "application/pdf" => "pdf",
        "application/zip" => "zip",
        "text/plain" => "txt",
        _ => "bin",
    }
}
