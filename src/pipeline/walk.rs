//! Walk loop: enumerates the tree, counts each entry, and queues its name and content tasks.

use crossbeam_channel::Sender;
use log::{debug, trace};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::tools::{entry_name, is_special_file, mtime_ns};
use crate::error::SearchError;
use crate::{EntryInfo, MatchKind, SearchEvent};

use super::context::{PipelineContext, WalkResult};
use super::tracker::TaskGuard;

/// One unit of matcher work. Holds its in-flight guard until the worker has emitted its event.
#[derive(Debug)]
pub struct Task {
    pub kind: MatchKind,
    pub entry: Arc<EntryInfo>,
    _guard: TaskGuard,
}

impl Task {
    pub fn new(kind: MatchKind, entry: Arc<EntryInfo>, guard: TaskGuard) -> Self {
        Self {
            kind,
            entry,
            _guard: guard,
        }
    }
}

/// One result from a directory walk: either an entry to dispatch or an enumeration error.
pub enum WalkItem {
    Ok(EntryInfo),
    Err(String),
}

/// Convert a walkdir result into [`WalkItem`]. A failed stat counts as an enumeration error.
pub fn to_item_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkItem {
    let entry = match r {
        Ok(entry) => entry,
        Err(err) => return WalkItem::Err(err.to_string()),
    };
    let meta = match entry.metadata() {
        Ok(meta) => meta,
        Err(err) => return WalkItem::Err(err.to_string()),
    };
    let file_type = entry.file_type();
    let is_dir = file_type.is_dir();
    let size = if is_dir { 0 } else { meta.len() };
    let info = EntryInfo::new(
        entry.path().to_path_buf(),
        entry_name(entry.path()),
        is_dir,
        size,
        mtime_ns(&meta),
    );
    WalkItem::Ok(info.with_special(is_special_file(&file_type)))
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkItem>> {
    use walkdir::WalkDir;
    // The root directory itself is not an entry; a root that is a plain file is.
    let min_depth = if ctx.root.is_dir() { 1 } else { 0 };
    Box::new(
        WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .min_depth(min_depth)
            .into_iter()
            .map(to_item_walkdir),
    )
}

pub fn spawn_walk_thread(
    task_tx: Sender<Task>,
    event_tx: Sender<SearchEvent>,
    walk_guard: TaskGuard,
    ctx: PipelineContext,
) -> JoinHandle<WalkResult> {
    thread::spawn(move || {
        let iter = walkdir_iter(&ctx);
        run_walk_loop(task_tx, event_tx, walk_guard, &ctx, iter)
    })
}

/// Run the walk loop: consume `iter` of [`WalkItem`] and dispatch every entry.
/// The first enumeration error aborts the walk; already-queued tasks still finish.
/// Drops `task_tx` and the walk guard when done. Returns the count of entries dispatched.
pub fn run_walk_loop<I>(
    task_tx: Sender<Task>,
    event_tx: Sender<SearchEvent>,
    walk_guard: TaskGuard,
    ctx: &PipelineContext,
    iter: I,
) -> WalkResult
where
    I: Iterator<Item = WalkItem>,
{
    let _walk_guard = walk_guard;
    let mut count = 0_u64;
    for item in iter {
        match item {
            WalkItem::Ok(info) => {
                if !dispatch_entry(&task_tx, &event_tx, ctx, info) {
                    break;
                }
                count += 1;
            }
            WalkItem::Err(msg) => {
                debug!("walk: aborting after {} entries: {}", count, msg);
                return Err(SearchError::traversal(msg));
            }
        }
    }
    debug!("walk: done, {} entries dispatched", count);
    Ok(count)
}

/// Count the entry, then queue its name task and (for regular files under the ceiling) its content task.
/// Returns false when the worker pool is gone.
fn dispatch_entry(
    task_tx: &Sender<Task>,
    event_tx: &Sender<SearchEvent>,
    ctx: &PipelineContext,
    info: EntryInfo,
) -> bool {
    ctx.counters.record_visit(info.is_dir);
    let entry = Arc::new(info);

    let name_task = Task::new(MatchKind::Name, Arc::clone(&entry), ctx.in_flight.track());
    if task_tx.send(name_task).is_err() {
        return false;
    }
    if entry.is_dir {
        return true;
    }
    if entry.is_special {
        trace!("{} is not a regular file, name only", entry.path.display());
        return true;
    }

    if entry.size < ctx.size_ceiling {
        let content_task = Task::new(MatchKind::Content, Arc::clone(&entry), ctx.in_flight.track());
        task_tx.send(content_task).is_ok()
    } else {
        trace!(
            "{} skipped: {} bytes >= ceiling {}",
            entry.path.display(),
            entry.size,
            ctx.size_ceiling
        );
        event_tx
            .send(SearchEvent::SkippedTooLarge {
                path: entry.path.clone(),
                size: entry.size,
            })
            .is_ok()
    }
}
