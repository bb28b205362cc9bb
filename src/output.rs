//! Help output — banners, usage, and aligned option/command lines.
//!
//! Option lines look like this, with the description wrapped and indented to
//! the flag column:
//!
//! ```text
//!  -f, --file FILE          read input from FILE instead of standard
//!                           input
//!      --tag NAME[+]        tag to apply
//! ```

use std::fmt;

use crate::config::LayoutConfig;

/// Accumulated help text.
#[derive(Debug, Clone)]
pub struct HelpOutput {
    layout: LayoutConfig,
    columns: u16,
    text: String,
}

impl HelpOutput {
    /// Empty output; the wrap width is resolved once, here.
    pub fn new(layout: LayoutConfig) -> Self {
        let columns = layout.resolved_columns();
        Self {
            layout,
            columns,
            text: String::new(),
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Wrap width in effect.
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Free text, such as a section title.
    pub fn banner(&mut self, text: &str) {
        let wrapped = wrap(text, self.layout.text_width(self.columns)).join("\n");
        self.write(&wrapped);
    }

    pub fn usage(&mut self, usage: &str) {
        self.write("Usage:");
        self.write(&format!("  {}", usage));
    }

    pub fn command(&mut self, command: &str, description: &str) {
        let line = self.pad(command, description);
        self.write(&line);
    }

    pub fn option(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        parameter: Option<&str>,
        description: &str,
    ) {
        let mut label = match (short, long) {
            (Some(s), Some(l)) => format!("-{}, --{}", s, l),
            (None, Some(l)) => format!("    --{}", l),
            (Some(s), None) => format!("-{}", s),
            (None, None) => String::new(),
        };
        if let Some(parameter) = parameter {
            label.push(' ');
            label.push_str(parameter);
        }

        let line = self.pad(&label, description);
        self.write(&line);
    }

    /// Append a line.
    pub fn write(&mut self, text: &str) {
        self.text.push_str(text);
        self.text.push('\n');
    }

    pub fn help(&self) -> &str {
        &self.text
    }

    /// Label in the flag column, description wrapped beside it.
    fn pad(&self, label: &str, description: &str) -> String {
        let column = self.layout.option_padding as usize;
        let head = format!(" {}", label);

        let lines = wrap(description, self.layout.description_width(self.columns));
        let Some((first, rest)) = lines.split_first() else {
            return head;
        };

        let indent = " ".repeat(column);
        let mut out = if head.chars().count() < column {
            format!("{:<width$}{}", head, first, width = column)
        } else {
            // Flag column overflows: description starts on its own line.
            format!("{}\n{}{}", head, indent, first)
        };
        for line in rest {
            out.push('\n');
            out.push_str(&indent);
            out.push_str(line);
        }
        out
    }
}

impl fmt::Display for HelpOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Greedy word wrap. Words longer than `width` are kept whole; explicit
/// newlines start a new line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if len > 0 && len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.push_str(word);
            len += word_len;
        }

        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> HelpOutput {
        HelpOutput::new(LayoutConfig::with_columns(80))
    }

    #[test]
    fn test_option_lines() {
        let cases = [
            (Some('h'), None, None, "show help", format!("{:<26}show help\n", " -h")),
            (Some('f'), None, Some("FILE"), "show file", format!("{:<26}show file\n", " -f FILE")),
            (Some('h'), Some("help"), None, "show help", format!("{:<26}show help\n", " -h, --help")),
            (
                Some('f'),
                Some("file"),
                Some("FILE"),
                "show file",
                format!("{:<26}show file\n", " -f, --file FILE"),
            ),
            (None, Some("file"), Some("FILE"), "show file", format!("{:<26}show file\n", "     --file FILE")),
        ];

        for (short, long, parameter, description, expected) in cases {
            let mut out = output();
            out.option(short, long, parameter, description);
            assert_eq!(out.help(), expected);
        }
    }

    #[test]
    fn test_command_line() {
        let mut out = output();
        out.command("command", "command description");
        assert_eq!(out.help(), format!("{:<26}command description\n", " command"));
    }

    #[test]
    fn test_banner_and_usage() {
        let mut out = output();
        out.banner("global options:");
        out.usage("script cmd [-f --flags]");
        assert_eq!(out.help(), "global options:\nUsage:\n  script cmd [-f --flags]\n");
        assert_eq!(out.to_string(), out.help());
    }

    #[test]
    fn test_empty_description_keeps_label_only() {
        let mut out = output();
        out.option(Some('q'), Some("quiet"), None, "");
        assert_eq!(out.help(), " -q, --quiet\n");
    }

    #[test]
    fn test_long_description_wraps_under_flag_column() {
        let mut out = HelpOutput::new(LayoutConfig::with_columns(40));
        // 40 - 2 - 26 = 12 columns for descriptions
        out.option(Some('v'), None, None, "print more output please");
        let lines: Vec<&str> = out.help().lines().collect();
        assert_eq!(lines[0], format!("{:<26}print more", " -v"));
        assert_eq!(lines[1], format!("{}output", " ".repeat(26)));
        assert_eq!(lines[2], format!("{}please", " ".repeat(26)));
    }

    #[test]
    fn test_overflowing_label_moves_description_down() {
        let mut out = output();
        out.option(None, Some("a-very-long-option-name"), Some("VALUE"), "text");
        let lines: Vec<&str> = out.help().lines().collect();
        assert_eq!(lines[0], "     --a-very-long-option-name VALUE");
        assert_eq!(lines[1], format!("{}text", " ".repeat(26)));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap("unbreakable", 4), vec!["unbreakable"]);
        assert_eq!(wrap("one\ntwo", 80), vec!["one", "two"]);
        assert!(wrap("", 10).is_empty());
    }
}
