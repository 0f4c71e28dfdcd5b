use crate::candidate::CandidateKey;
use crate::host::EditorHost;
use crate::host::ViewId;
use crate::host::VisibleLine;
use crate::options::SearchOptions;
use crate::query::CONTEXT_LEN;
use tracing::debug;

/// Finds anchor occurrences in the text the user can currently see.
///
/// Candidates come out in discovery order: host view order, then line order,
/// then left to right within a line. Label allocation and the accept
/// tie-break both rely on that order.
#[derive(Debug, Clone, Copy)]
pub struct CorpusScanner {
    options: SearchOptions,
}

impl CorpusScanner {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn relevant_views<H>(&self, host: &H) -> Vec<ViewId>
    where
        H: EditorHost + ?Sized,
    {
        if self.options.all_editors {
            return host.visible_views();
        }
        host.active_view().into_iter().collect()
    }

    pub fn scan<H>(&self, host: &H, anchor: &str) -> Vec<CandidateKey>
    where
        H: EditorHost + ?Sized,
    {
        if anchor.is_empty() {
            return Vec::new();
        }
        let fold = !self.options.is_case_sensitive(anchor);
        let pattern: Vec<char> = if fold {
            anchor.chars().map(fold_char).collect()
        } else {
            anchor.chars().collect()
        };
        let spaces_only = pattern.iter().all(|c| *c == ' ');

        let views = self.relevant_views(host);
        let mut found = Vec::new();
        for view in &views {
            for line in host.visible_lines(*view) {
                scan_line(*view, &line, &pattern, spaces_only, fold, &mut found);
            }
        }
        debug!(
            anchor,
            views = views.len(),
            candidates = found.len(),
            "scanned visible text"
        );
        found
    }
}

fn scan_line(
    view: ViewId,
    line: &VisibleLine,
    pattern: &[char],
    spaces_only: bool,
    fold: bool,
    found: &mut Vec<CandidateKey>,
) {
    let mut chars: Vec<char> = if fold {
        line.text.chars().map(fold_char).collect()
    } else {
        line.text.chars().collect()
    };
    let text_len = chars.len();
    // Sentinel so an anchor can match at end of line.
    chars.push(' ');

    // Leading indentation only matters when the user is looking for spaces.
    let from = if spaces_only {
        0
    } else {
        chars
            .iter()
            .position(|c| !c.is_whitespace())
            .unwrap_or(chars.len())
    };

    let hits = chars[from..]
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern);
    for (offset, _) in hits {
        let start = from + offset;
        found.push(CandidateKey {
            view,
            line: line.number,
            start,
            end: start + CONTEXT_LEN,
        });
    }

    if spaces_only {
        found.push(CandidateKey {
            view,
            line: line.number,
            start: text_len,
            end: text_len,
        });
    }
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
