use tracing::{debug, info};

use crate::error::Result;
use crate::tools::{self, Marker};
use crate::types::{EditOutcome, EditRequest};
use crate::utils::clip;

/// Runs one edit: duplicate guard, in-memory transform, backup, write.
///
/// The file on disk is only touched after the transform has succeeded, so an
/// engine error never leaves a backup behind or a half-written target.
pub fn apply_edit(request: &EditRequest) -> Result<EditOutcome> {
    let path = &request.file_path;
    let text = tools::read_file(path)?;
    debug!(file = %path.display(), bytes = text.len(), "loaded file");

    let marker = request
        .marker_id
        .as_deref()
        .map(|id| Marker::new(id, request.marker_style));

    if let (Some(marker), Some(id)) = (&marker, &request.marker_id) {
        if !request.force && marker.is_present(&text) {
            info!(marker = %id, "start marker already present, skipping");
            return Ok(EditOutcome::AlreadyPresent { marker: id.clone() });
        }
    }

    let anchor = match (&request.pattern, request.mode.requires_pattern()) {
        (Some(pattern), true) => Some(tools::compile_pattern(pattern)?),
        _ => None,
    };

    let wrapped = tools::wrap_snippet(&request.snippet, marker.as_ref());
    debug!(
        mode = %request.mode,
        snippet = %clip(&wrapped, 80),
        "applying edit"
    );
    let updated =
        tools::insert_snippet(&text, request.mode, wrapped.as_bytes(), anchor.as_ref())?;

    if request.dry_run {
        return Ok(EditOutcome::DryRun { content: updated });
    }

    let backup = if request.skip_backup {
        None
    } else {
        Some(tools::create_backup(path)?)
    };

    tools::write_file(path, &updated)?;
    info!(file = %path.display(), bytes = updated.len(), "edit written");

    Ok(EditOutcome::Applied { backup })
}
