//! Interactive operator input
//!
//! The crawler core never reads from the terminal. This module collects the
//! raw strings the operator types (store URL, delay, export choice, file name)
//! and turns them into validated settings before the crawl starts. Values
//! already given on the command line are not asked for again.

use crate::config::{CrawlerConfig, SiteConfig};
use crate::crawler::{CrawlOutput, RunSettings};
use crate::output::{export_records, format_statistics, ExportFormat};
use crate::url::{validate_target, CrawlTarget};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Source of operator answers
pub trait Prompt {
    /// Shows `question` and returns the trimmed answer
    ///
    /// Returns `io::ErrorKind::UnexpectedEof` once no more input can arrive.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Shows an informational line
    fn say(&mut self, message: &str);
}

/// Reads answers from standard input
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Answers from a fixed script; records every question and message
///
/// Used for non-interactive runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub messages: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn say(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Operator's export decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportChoice {
    /// `None` when the operator picked an unknown option; nothing is exported
    pub format: Option<ExportFormat>,

    /// File name as typed, before sanitising
    pub name: String,
}

/// Asks for the store URL until it validates
pub fn ask_target(prompt: &mut dyn Prompt, site: &SiteConfig) -> io::Result<CrawlTarget> {
    loop {
        let answer = prompt.ask("Enter Payhip URL: ")?;
        match validate_target(&answer, site) {
            Ok(target) => {
                announce_correction(prompt, &answer, &target);
                return Ok(target);
            }
            Err(e) => {
                tracing::debug!("Rejected target: {}", e);
                prompt.say(&invalid_target_message(site));
            }
        }
    }
}

/// Validates the URL given on the command line, or asks until one validates
///
/// A rejected command-line URL is reported and the operator is prompted instead.
pub fn resolve_target(
    url: Option<&str>,
    site: &SiteConfig,
    prompt: &mut dyn Prompt,
) -> io::Result<CrawlTarget> {
    if let Some(url) = url {
        match validate_target(url, site) {
            Ok(target) => {
                announce_correction(prompt, url, &target);
                return Ok(target);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                prompt.say(&invalid_target_message(site));
            }
        }
    }

    ask_target(prompt, site)
}

fn announce_correction(prompt: &mut dyn Prompt, given: &str, target: &CrawlTarget) {
    if target.as_str() != given.trim() {
        prompt.say(&format!("URL corrected to: {}", target));
    }
}

/// Diagnostic shown for a rejected store URL
pub fn invalid_target_message(site: &SiteConfig) -> String {
    format!(
        "Invalid URL. Please enter a valid Payhip URL in the format:\n   {}/<username>{}",
        site.origin.trim_end_matches('/'),
        site.collection_path
    )
}

/// Interprets the delay answer
///
/// Only a plain non-negative integer (ASCII digits) is accepted as a number of
/// seconds; anything else, including an empty answer, yields `default`.
///
/// # Example
///
/// ```
/// use payhip_scraper::prompt::parse_delay;
/// use std::time::Duration;
///
/// let default = Duration::from_secs(1);
/// assert_eq!(parse_delay("3", default), Duration::from_secs(3));
/// assert_eq!(parse_delay("1.5", default), default);
/// ```
pub fn parse_delay(input: &str, default: Duration) -> Duration {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return default;
    }
    input
        .parse::<u64>()
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Asks for the pause between products
pub fn ask_delay(prompt: &mut dyn Prompt, default: Duration) -> io::Result<Duration> {
    let answer = prompt.ask(&format!(
        "Enter delay between requests (in seconds, default {}): ",
        default.as_secs()
    ))?;
    Ok(parse_delay(&answer, default))
}

/// Shows the export menu and reads the choice
///
/// Returns `None` for anything other than `1` or `2`.
pub fn ask_format(prompt: &mut dyn Prompt) -> io::Result<Option<ExportFormat>> {
    prompt.say("Export options:");
    prompt.say("1. Export to JSON");
    prompt.say("2. Export to CSV");
    let choice = prompt.ask("Choose an export option (1/2): ")?;
    Ok(ExportFormat::from_choice(&choice))
}

/// Asks for the export file name, unsanitised
pub fn ask_filename(prompt: &mut dyn Prompt) -> io::Result<String> {
    prompt.ask("Enter filename (without extension): ")
}

/// Builds the run settings for `target`, asking for the delay unless given
pub fn resolve_settings(
    target: CrawlTarget,
    delay: Option<u64>,
    crawler: &CrawlerConfig,
    prompt: &mut dyn Prompt,
) -> io::Result<RunSettings> {
    let delay = match delay {
        Some(secs) => Duration::from_secs(secs),
        None => ask_delay(prompt, crawler.default_delay())?,
    };
    Ok(RunSettings { target, delay })
}

/// Settles the export format and file name, asking for whichever is missing
///
/// An invalid format answer still goes on to ask for the file name.
pub fn resolve_export(
    format: Option<ExportFormat>,
    name: Option<&str>,
    prompt: &mut dyn Prompt,
) -> io::Result<ExportChoice> {
    let format = match format {
        Some(format) => Some(format),
        None => ask_format(prompt)?,
    };
    let name = match name {
        Some(name) => name.to_string(),
        None => ask_filename(prompt)?,
    };
    Ok(ExportChoice { format, name })
}

/// Exports the crawl result as chosen, then reports the summary
///
/// An unrecognised format or a failed write leaves nothing exported. The
/// summary, ending with the record count, is reported either way.
///
/// # Returns
///
/// * `Some(PathBuf)` - Path of the written file
/// * `None` - Nothing was exported
pub fn finish_run(
    output: &CrawlOutput,
    choice: &ExportChoice,
    dir: &Path,
    prompt: &mut dyn Prompt,
) -> Option<PathBuf> {
    let written = match choice.format {
        Some(format) => match export_records(&output.records, format, dir, &choice.name) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                None
            }
        },
        None => {
            prompt.say("Invalid choice. No export performed.");
            None
        }
    };

    prompt.say("");
    prompt.say(&format_statistics(&output.stats));
    written
}
