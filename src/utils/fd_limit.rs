//! File descriptor limit detection for capping concurrent file reads (Unix).

/// Estimated number of file descriptors held per matcher worker (one open file plus walk handles).
pub const FDS_PER_WORKER: usize = 4;

/// Fraction of the process FD limit to use (leave headroom for the walk and stdio).
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Soft RLIMIT_NOFILE, or `None` when unlimited or unavailable.
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    let mut rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: getrlimit only writes into the struct we pass.
    let rc = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) };
    if rc != 0 || rlim.rlim_cur == libc::RLIM_INFINITY {
        return None;
    }
    u64::try_from(rlim.rlim_cur)
        .ok()
        .filter(|&cur| cur <= i64::MAX as u64)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Suggested max worker count so open files stay under ~80% of the FD limit.
/// Returns `None` if no limit is available (use caller's default).
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = max_open_fds()?;
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    if usable < FDS_PER_WORKER {
        return Some(1);
    }
    Some(usable / FDS_PER_WORKER)
}

/// Pick the pool size: explicit request wins, else available threads capped by the FD limit.
pub fn worker_count(requested: Option<usize>, available: usize, floor: usize) -> usize {
    if let Some(n) = requested {
        return n.max(1);
    }
    let n = match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < available => {
            log::debug!("Capping workers {} -> {} (FD limit ~80%)", available, fd_cap);
            fd_cap
        }
        _ => available,
    };
    n.max(floor).max(1)
}
