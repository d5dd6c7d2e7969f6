//! Python and R snippets listing a dataset's raw files
//!
//! Paths are written as string literals of the target language, so they are
//! escaped: a path containing a quote still yields valid source.

use std::fmt::Write as _;

/// Target language of a generated snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SnippetLanguage {
    Python,
    R,
}

impl SnippetLanguage {
    pub fn render(self, base_path: &str, files: &[String]) -> String {
        match self {
            Self::Python => python_snippet(base_path, files),
            Self::R => r_snippet(base_path, files),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::R => "R",
        }
    }

    /// Confirmation shown after the snippet reaches the clipboard
    pub fn copied_message(self) -> String {
        format!("{} snippet copied to clipboard!", self.label())
    }
}

/// `value` as a literal delimited by `quote`
fn quoted(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            },
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            },
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Array body with one literal per line
fn literal_lines(files: &[String], quote: char) -> String {
    files
        .iter()
        .map(|f| format!("  {}", quoted(f, quote)))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Python source declaring `base_path` and the list of raw files under it
pub fn python_snippet(base_path: &str, files: &[String]) -> String {
    let array = if files.is_empty() {
        "raw_file_array = []".to_string()
    } else {
        format!("raw_file_array = [\n{}\n]", literal_lines(files, '\''))
    };

    format!(
        "import os\n\
         \n\
         base_path = {}\n\
         {array}\n\
         \n\
         file_paths = [os.path.join(base_path, f) for f in raw_file_array]\n\
         print(file_paths)\n",
        quoted(base_path, '\''),
    )
}

/// R source declaring `base_path`, the raw file vector, and their `paste` join
pub fn r_snippet(base_path: &str, files: &[String]) -> String {
    let vector = if files.is_empty() {
        "raw_file_array <- c()".to_string()
    } else {
        format!("raw_file_array <- c(\n{}\n)", literal_lines(files, '"'))
    };

    format!(
        "# Define the base path\n\
         base_path <- {}\n\
         \n\
         # Define the raw file array\n\
         {vector}\n\
         \n\
         # Combine paths\n\
         file_paths <- paste(base_path, raw_file_array, sep = \"\")\n\
         \n\
         # Print the file paths\n\
         print(file_paths)\n",
        quoted(base_path, '"'),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_python_snippet_layout() {
        let code = python_snippet(
            "/project/genomics/lung/",
            &paths(&["a_R1.fastq", "a_R2.fastq"]),
        );
        assert_eq!(
            code,
            "import os\n\
             \n\
             base_path = '/project/genomics/lung/'\n\
             raw_file_array = [\n  'a_R1.fastq',\n  'a_R2.fastq'\n]\n\
             \n\
             file_paths = [os.path.join(base_path, f) for f in raw_file_array]\n\
             print(file_paths)\n"
        );
    }

    #[test]
    fn test_r_snippet_joins_with_paste() {
        let code = r_snippet("/data/", &paths(&["x.fasta"]));
        assert!(code.contains("base_path <- \"/data/\"\n"));
        assert!(code.contains("raw_file_array <- c(\n  \"x.fasta\"\n)"));
        assert!(code.contains("file_paths <- paste(base_path, raw_file_array, sep = \"\")"));
    }

    #[test]
    fn test_empty_file_list() {
        assert!(python_snippet("/data/", &[]).contains("raw_file_array = []\n"));
        assert!(r_snippet("/data/", &[]).contains("raw_file_array <- c()\n"));
    }

    #[test]
    fn test_quotes_and_controls_are_escaped() {
        let files = paths(&["it's.fastq", "say \"hi\".bam", "back\\slash", "tab\there"]);

        let python = python_snippet("/o'brien/", &files);
        assert!(python.contains("base_path = '/o\\'brien/'"));
        assert!(python.contains("'it\\'s.fastq'"));
        assert!(python.contains("'say \"hi\".bam'"));
        assert!(python.contains("'back\\\\slash'"));
        assert!(python.contains("'tab\\there'"));

        let r = r_snippet("/data/", &files);
        assert!(r.contains("\"it's.fastq\""));
        assert!(r.contains("\"say \\\"hi\\\".bam\""));
        assert!(quoted("bell\u{7}", '"').ends_with("\\x07\""));
    }

    #[test]
    fn test_language_messages() {
        assert_eq!(
            SnippetLanguage::Python.copied_message(),
            "Python snippet copied to clipboard!"
        );
        assert_eq!(SnippetLanguage::R.copied_message(), "R snippet copied to clipboard!");
    }

    proptest! {
        #[test]
        fn prop_every_path_quoted_once_in_order(
            set in proptest::collection::btree_set("[a-z0-9_.-]{1,12}", 0..12)
        ) {
            let files: Vec<String> = set.into_iter().collect();
            for language in [SnippetLanguage::Python, SnippetLanguage::R] {
                let quote = if language == SnippetLanguage::Python { '\'' } else { '"' };
                let code = language.render("/data/", &files);

                let mut last = 0;
                for file in &files {
                    let needle = format!("{quote}{file}{quote}");
                    prop_assert_eq!(code.matches(&needle).count(), 1);
                    let at = code.find(&needle).unwrap_or(0);
                    prop_assert!(at >= last);
                    last = at;
                }
            }
        }
    }
}
