use std::path::PathBuf;

use clap::Parser;

/// textfinder: find text in an HTML page, including text hidden behind
/// collapsed sections.
#[derive(Parser, Debug)]
#[command(name = "textfinder", version, about)]
pub struct Args {
    /// HTML file to search.
    pub file: PathBuf,

    /// Text to search for.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only match the exact letter case.
    #[arg(long)]
    pub match_case: bool,

    /// Only match whole words.
    #[arg(long)]
    pub whole_word: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Replay JSON request lines from a file instead of a single query.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Print the document with highlights after running.
    #[arg(long)]
    pub print_html: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_and_flags() {
        let args = Args::parse_from([
            "textfinder",
            "page.html",
            "--query",
            "hello",
            "--whole-word",
            "--print-html",
        ]);
        assert_eq!(args.file, PathBuf::from("page.html"));
        assert_eq!(args.query.as_deref(), Some("hello"));
        assert!(args.whole_word);
        assert!(!args.match_case);
        assert!(args.print_html);
        assert!(args.script.is_none());
    }

    #[test]
    fn file_is_required() {
        assert!(Args::try_parse_from(["textfinder"]).is_err());
    }
}
