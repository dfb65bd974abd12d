//! Source rewriters for C# code and part config files.
//!
//! Both rewriters work line by line, record every changed line for preview,
//! and hand back the whole new file content. Nothing here touches the disk.

mod cfg;
mod code;

pub use cfg::{rewrite_cfg, rewrite_cfg_line};
pub use code::{CodeRewriter, LOCALIZATION_USING, RewrittenLine, rewrite_code};

/// A single changed line, kept for dry-run previews and verbose output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// 1-based line number in the original file.
    pub line: usize,
    /// Byte offset of the first replaced text within the original line.
    pub offset: usize,
    pub before: String,
    pub after: String,
}

/// Result of rewriting one file.
#[derive(Debug, Clone, Default)]
pub struct FileRewrite {
    pub content: String,
    pub changes: Vec<LineChange>,
    /// Whether a `using KSP.Localization;` directive had to be added.
    pub using_inserted: bool,
}

impl FileRewrite {
    pub fn is_modified(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Line endings of a file, restored line by line when the rewritten lines
/// are joined, so mixed LF/CRLF files keep every ending they had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineLayout {
    endings: Vec<&'static str>,
    /// Ending for inserted lines: the file's majority style.
    dominant: &'static str,
}

impl LineLayout {
    pub(crate) fn detect(source: &str) -> Self {
        let endings: Vec<&'static str> = source
            .split_inclusive('\n')
            .map(|line| {
                if line.ends_with("\r\n") {
                    "\r\n"
                } else if line.ends_with('\n') {
                    "\n"
                } else {
                    ""
                }
            })
            .collect();
        let crlf = endings.iter().filter(|e| **e == "\r\n").count();
        let lf = endings.iter().filter(|e| **e == "\n").count();
        Self {
            endings,
            dominant: if crlf > lf { "\r\n" } else { "\n" },
        }
    }

    /// Record a line inserted before line `at`.
    pub(crate) fn insert(&mut self, at: usize) {
        let at = at.min(self.endings.len());
        self.endings.insert(at, self.dominant);
    }

    pub(crate) fn join(&self, lines: &[String]) -> String {
        let mut out = String::new();
        for (idx, line) in lines.iter().enumerate() {
            out.push_str(line);
            out.push_str(self.endings.get(idx).copied().unwrap_or(self.dominant));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_layout_lf() {
        let src = "a\nb\n";
        let layout = LineLayout::detect(src);
        let parts: Vec<String> = src.lines().map(String::from).collect();
        assert_eq!(layout.join(&parts), src);
    }

    #[test]
    fn test_layout_crlf_without_trailing_newline() {
        let src = "a\r\nb";
        let layout = LineLayout::detect(src);
        assert_eq!(layout.join(&lines(&["a", "b"])), src);
    }

    #[test]
    fn test_layout_keeps_mixed_endings() {
        let src = "a\r\nb\nc\n";
        let layout = LineLayout::detect(src);
        assert_eq!(layout.join(&lines(&["a", "b", "c"])), src);
    }

    #[test]
    fn test_inserted_line_uses_majority_ending() {
        let mut layout = LineLayout::detect("a\r\nb\r\nc\n");
        layout.insert(0);
        assert_eq!(
            layout.join(&lines(&["x", "a", "b", "c"])),
            "x\r\na\r\nb\r\nc\n"
        );

        let mut layout = LineLayout::detect("a");
        layout.insert(0);
        assert_eq!(layout.join(&lines(&["x", "a"])), "x\na");
    }

    #[test]
    fn test_layout_empty() {
        let layout = LineLayout::detect("");
        assert_eq!(layout.join(&[]), "");
    }
}
