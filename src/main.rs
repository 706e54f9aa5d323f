//! Inkpad - Command-line entry point
//!
//! Usage:
//!   inkpad convert [FILE] [--standalone] [--title T] [--theme light|dark]
//!   inkpad to-markdown [FILE]
//!   inkpad title [FILE]
//!   inkpad preview [FILE]
//!   inkpad search QUERY [FILE]
//!
//! FILE defaults to stdin. Output goes to stdout. `search` exits with status 1
//! when the note does not match.

use clap::{Arg, ArgAction, ArgMatches, Command};
use inkpad::config::{load_config, Settings, Theme};
use inkpad::export::generate_html_document;
use inkpad::input::read_source;
use inkpad::markdown::{
    context_around_match, highlight_matches, note_matches, preview, PREVIEW_CHARS,
};
use inkpad::{convert, extract_title, html_to_markdown, strip_html, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Application name constant.
const APP_NAME: &str = "inkpad";

fn file_arg(index: usize) -> Arg {
    Arg::new("file")
        .help("Input file (reads stdin when omitted)")
        .value_parser(clap::value_parser!(PathBuf))
        .index(index)
}

fn cli() -> Command {
    Command::new(APP_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert quick-note Markdown to HTML and back")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Convert Markdown to HTML")
                .arg(file_arg(1))
                .arg(
                    Arg::new("standalone")
                        .long("standalone")
                        .short('s')
                        .help("Emit a complete HTML document")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .short('t')
                        .help("Document title for standalone output"),
                )
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .help("Theme for standalone output")
                        .value_parser(["light", "dark"]),
                ),
        )
        .subcommand(
            Command::new("to-markdown")
                .about("Convert note HTML back to Markdown")
                .arg(file_arg(1)),
        )
        .subcommand(
            Command::new("title")
                .about("Print the title derived from note HTML")
                .arg(file_arg(1)),
        )
        .subcommand(
            Command::new("preview")
                .about("Print a short plain-text preview of note HTML")
                .arg(file_arg(1)),
        )
        .subcommand(
            Command::new("search")
                .about("Show where a query matches in note HTML")
                .arg(
                    Arg::new("query")
                        .help("Text to look for, case-insensitively")
                        .required(true)
                        .index(1),
                )
                .arg(file_arg(2))
                .arg(
                    Arg::new("highlight")
                        .long("highlight")
                        .help("Wrap matches in <span class=\"highlight\">")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();
    let settings = load_config();
    debug!("Using settings: {:?}", settings);

    match run(&matches, &settings) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run the chosen subcommand. Returns `false` when a search finds nothing.
fn run(matches: &ArgMatches, settings: &Settings) -> Result<bool> {
    let (name, sub) = matches
        .subcommand()
        .expect("clap enforces a subcommand");
    let file = sub.get_one::<PathBuf>("file").map(PathBuf::as_path);
    let source = read_source(file, settings.max_input_bytes)?;
    info!("Running '{}' on {} bytes", name, source.len());

    match name {
        "convert" => {
            let standalone = sub.get_flag("standalone") || settings.standalone;
            if standalone {
                let title = sub
                    .get_one::<String>("title")
                    .map(String::as_str)
                    .unwrap_or(&settings.default_title);
                let theme = match sub.get_one::<String>("theme").map(String::as_str) {
                    Some("dark") => Theme::Dark,
                    Some(_) => Theme::Light,
                    None => settings.theme,
                };
                println!("{}", generate_html_document(&source, Some(title), theme));
            } else {
                println!("{}", convert(&source));
            }
        }
        "to-markdown" => print!("{}", html_to_markdown(&source)),
        "title" => println!("{}", extract_title(&source)),
        "preview" => println!("{}", preview(&source, PREVIEW_CHARS)),
        "search" => {
            let query = sub
                .get_one::<String>("query")
                .map(String::as_str)
                .unwrap_or_default();
            if !note_matches(&extract_title(&source), &source, query) {
                debug!("No match for '{}'", query);
                return Ok(false);
            }
            let snippet = context_around_match(&strip_html(&source), query);
            if sub.get_flag("highlight") {
                println!("{}", highlight_matches(&snippet, query));
            } else {
                println!("{}", snippet);
            }
        }
        _ => unreachable!("unknown subcommand '{}'", name),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_parse_convert_flags() {
        let matches = cli()
            .try_get_matches_from(["inkpad", "convert", "note.md", "-s", "--theme", "dark"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "convert");
        assert!(sub.get_flag("standalone"));
        assert_eq!(
            sub.get_one::<PathBuf>("file"),
            Some(&PathBuf::from("note.md"))
        );
        assert_eq!(sub.get_one::<String>("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(cli()
            .try_get_matches_from(["inkpad", "convert", "--theme", "blue"])
            .is_err());
    }

    #[test]
    fn test_parse_search_query_before_file() {
        let matches = cli()
            .try_get_matches_from(["inkpad", "search", "milk", "note.html", "--highlight"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "search");
        assert_eq!(sub.get_one::<String>("query").map(String::as_str), Some("milk"));
        assert_eq!(
            sub.get_one::<PathBuf>("file"),
            Some(&PathBuf::from("note.html"))
        );
        assert!(sub.get_flag("highlight"));
    }

    #[test]
    fn test_search_requires_query() {
        assert!(cli().try_get_matches_from(["inkpad", "search"]).is_err());
    }

    #[test]
    fn test_run_search_reports_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.html");
        std::fs::write(&path, "<h1>Groceries</h1><p>milk</p>").unwrap();
        let path = path.to_string_lossy().into_owned();
        let settings = Settings::default();

        let hit = cli()
            .try_get_matches_from(["inkpad", "search", "MILK", path.as_str()])
            .unwrap();
        assert!(run(&hit, &settings).unwrap());

        let miss = cli()
            .try_get_matches_from(["inkpad", "search", "bread", path.as_str()])
            .unwrap();
        assert!(!run(&miss, &settings).unwrap());
    }

    #[test]
    fn test_requires_subcommand() {
        assert!(cli().try_get_matches_from(["inkpad"]).is_err());
    }
}
