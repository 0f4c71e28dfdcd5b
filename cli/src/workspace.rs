use crate::Cli;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use leap_core::host::DocumentId;
use leap_core::host::EditorHost;
use leap_core::host::Selection;
use leap_core::memory::MemoryHost;
use std::path::Path;

/// Opens every `--file` in its own view, then the `--diff` pair, and applies
/// the caret and viewport.
pub(crate) fn open(cli: &Cli) -> Result<MemoryHost> {
    if cli.files.is_empty() && cli.diff.is_none() {
        bail!("nothing to search: pass --file or --diff");
    }

    let host = MemoryHost::new();
    for path in &cli.files {
        host.add_view(document_id(path), &read(path)?);
    }
    if let Some([original, modified]) = cli.diff.as_deref() {
        host.add_comparison(
            (document_id(original), &read(original)?),
            (document_id(modified), &read(modified)?),
        );
    }

    if let Some(caret) = cli.cursor {
        let view = host
            .active_view()
            .context("no focused view to place the cursor in")?;
        host.set_selection(view, Selection::caret(caret));
    }
    if let Some(lines) = &cli.viewport {
        for view in host.visible_views() {
            host.set_viewport(view, lines.clone());
        }
    }
    Ok(host)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn document_id(path: &Path) -> DocumentId {
    DocumentId::new(path.display().to_string())
}
