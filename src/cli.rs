use chrono::Local;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "./Midjourney Feed.html";

#[derive(Parser, Debug)]
#[command(name = "mj-feed-dl")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Saved feed page to scan for image links
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output directory (default: today's date as YYYYMMDD)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write manifest.json mapping each source URL to its saved file
    #[arg(long)]
    pub manifest: bool,
}

impl Args {
    pub fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(default_output_dir)
    }
}

/// Per-run folder named after the local date, e.g. `20240131`.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(Local::now().format("%Y%m%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_fixed_input_and_dated_output() {
        let args = Args::try_parse_from(["mj-feed-dl"]).unwrap();

        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
        assert!(!args.manifest);

        let output = args.output_dir();
        let name = output.to_str().unwrap();
        assert_eq!(name.len(), 8);
        assert!(name.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let args = Args::try_parse_from([
            "mj-feed-dl",
            "--input",
            "feed.html",
            "-o",
            "out",
            "--manifest",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("feed.html"));
        assert_eq!(args.output_dir(), PathBuf::from("out"));
        assert!(args.manifest);
    }
}
