use tracing::{info, warn};

/// Pins the current thread to the core with id `core`.
///
/// Returns false, and logs why, if the core does not exist or the OS refused the request.
pub fn pin_to_core(core: usize) -> bool {
    let core_id = core_affinity::get_core_ids()
        .and_then(|core_ids| core_ids.into_iter().find(|core_id| core_id.id == core));

    let Some(core_id) = core_id else {
        warn!(core, "core not available, running unpinned");
        return false;
    };

    if core_affinity::set_for_current(core_id) {
        info!(core, "pinned benchmark thread");
        true
    } else {
        warn!(core, "failed to pin benchmark thread, running unpinned");
        false
    }
}
