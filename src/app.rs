//! Runs one command against a loaded buffer.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use quill_buffer::TextBuffer;
use quill_config::SearchSettings;
use quill_text_search::{Confirm, SearchEngine};

use crate::cli::{Cli, Command};

/// Yes/no prompt on the terminal.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if write!(self.output, "{} [y/N] ", question).is_err() || self.output.flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Execute `command`, writing status lines to `out`.
pub fn execute<W: Write>(
    command: &Command,
    buffer: &mut TextBuffer,
    settings: &SearchSettings,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<()> {
    let mut engine = SearchEngine::new();

    match command {
        Command::Find { search, count } => {
            let result = engine.find(buffer, &search.to_params(settings))?;
            writeln!(out, "{}", result)?;

            let mut found = result.found;
            for _ in 1..*count {
                if !found {
                    break;
                }
                match engine.find_again(buffer)? {
                    Some(result) => {
                        writeln!(out, "{}", result)?;
                        found = result.found;
                    }
                    None => break,
                }
            }
        }
        Command::Replace {
            search,
            replacement,
            edit,
        } => {
            let params = search.to_params(settings);
            let prompt = edit.wants_confirm(settings).then_some(confirm);
            let result = engine.replace_one(buffer, &params, replacement, prompt)?;
            writeln!(out, "{}", result)?;
        }
        Command::ReplaceAll {
            search,
            replacement,
            edit,
        } => {
            let params = search.to_params(settings);
            let prompt = edit.wants_confirm(settings).then_some(confirm);
            let result = engine.replace_all(buffer, &params, replacement, prompt)?;
            if result.replaced_count == 0 && !result.declined {
                writeln!(out, "No matches.")?;
            } else {
                writeln!(out, "{}", result)?;
            }
        }
        Command::Goto { line } => {
            let result = engine.go_to_line(buffer, *line);
            writeln!(out, "{}", result)?;
        }
    }

    Ok(())
}

/// Load the file, run the command, and write the file back if asked to.
pub fn run<W: Write>(
    cli: &Cli,
    settings: &SearchSettings,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<()> {
    let mut buffer = TextBuffer::from_file(&cli.file)?;
    quill_logger::info(format!("Opened {}", cli.file.display()));

    execute(&cli.command, &mut buffer, settings, confirm, out)?;

    if wants_write(&cli.command) && buffer.is_modified() {
        buffer
            .save()
            .with_context(|| format!("Failed to save {}", cli.file.display()))?;
        quill_logger::info(format!("Saved {}", cli.file.display()));
    }

    Ok(())
}

/// Whether the command asked for the file to be written back.
fn wants_write(command: &Command) -> bool {
    match command {
        Command::Replace { edit, .. } | Command::ReplaceAll { edit, .. } => edit.write,
        Command::Find { .. } | Command::Goto { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn exec(args: &[&str], text: &str, answer: bool) -> (TextBuffer, String) {
        let cli = Cli::parse_from(args);
        let mut buffer = TextBuffer::from_text(text);
        let mut confirm = |_: &str| answer;
        let mut out = Vec::new();
        execute(
            &cli.command,
            &mut buffer,
            &SearchSettings::default(),
            &mut confirm,
            &mut out,
        )
        .unwrap();
        (buffer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_find_walks_matches() {
        let (_, out) = exec(
            &["quill", "f", "find", "foo", "--count", "5"],
            "foo bar foo baz foo",
            true,
        );
        assert_eq!(
            out,
            "Found match at 1:0\nFound match at 1:8\nFound match at 1:16\nNo matches.\n"
        );
    }

    #[test]
    fn test_replace_all_without_prompt() {
        let (buffer, out) = exec(
            &["quill", "f", "replace-all", "a[0-9]", "x", "--regex", "--no-confirm"],
            "a1 a2 a3",
            false,
        );
        assert_eq!(buffer.text(), "x x x");
        assert_eq!(out, "3 occurrences replaced.\n");
    }

    #[test]
    fn test_replace_all_declined_by_prompt() {
        let (buffer, out) = exec(&["quill", "f", "replace-all", "a", "b"], "a a", false);
        assert_eq!(buffer.text(), "a a");
        assert_eq!(out, "Replace cancelled.\n");
    }

    #[test]
    fn test_replace_all_no_matches() {
        let (_, out) = exec(&["quill", "f", "replace-all", "zzz", "b"], "a a", true);
        assert_eq!(out, "No matches.\n");
    }

    #[test]
    fn test_replace_one_confirmed() {
        let (buffer, out) = exec(&["quill", "f", "replace", "two", "2"], "one\ntwo", true);
        assert_eq!(buffer.text(), "one\n2");
        assert_eq!(out, "Replaced text at 2:0\n");
    }

    #[test]
    fn test_goto_out_of_range() {
        let (buffer, out) = exec(&["quill", "f", "goto", "99"], "a\nb", true);
        assert_eq!(out, "Line 1\n");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let cli = Cli::parse_from(["quill", "f", "find", "(", "--regex"]);
        let mut buffer = TextBuffer::from_text("(");
        let mut confirm = |_: &str| true;
        let err = execute(
            &cli.command,
            &mut buffer,
            &SearchSettings::default(),
            &mut confirm,
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid regular expression"));
    }

    #[test]
    fn test_run_writes_file_back() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "cat\r\ncategory cat\r\n").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from([
            "quill", path, "replace-all", "cat", "dog", "--whole-word", "--no-confirm", "--write",
        ]);
        let mut confirm = |_: &str| false;
        let mut out = Vec::new();
        run(&cli, &SearchSettings::default(), &mut confirm, &mut out).unwrap();

        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "dog\r\ncategory dog\r\n"
        );
        assert_eq!(String::from_utf8(out).unwrap(), "2 occurrences replaced.\n");
    }

    #[test]
    fn test_run_without_write_leaves_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "abc").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["quill", path, "replace-all", "b", "x", "--no-confirm"]);
        let mut confirm = |_: &str| true;
        let mut out = Vec::<u8>::new();
        run(&cli, &SearchSettings::default(), &mut confirm, &mut out).unwrap();

        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "abc");
    }

    #[test]
    fn test_run_missing_file() {
        let cli = Cli::parse_from(["quill", "/nonexistent/quill.txt", "goto", "1"]);
        let mut confirm = |_: &str| true;
        let err = run(
            &cli,
            &SearchSettings::default(),
            &mut confirm,
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_prompt_confirm_reads_answer() {
        let mut output = Vec::new();
        let mut prompt = PromptConfirm::new("yes\n".as_bytes(), &mut output);
        assert!(prompt.confirm("Replace this text?"));
        drop(prompt);
        assert_eq!(String::from_utf8(output).unwrap(), "Replace this text? [y/N] ");

        let mut prompt = PromptConfirm::new("\n".as_bytes(), Vec::<u8>::new());
        assert!(!prompt.confirm("Replace this text?"));
    }
}
