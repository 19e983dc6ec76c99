use crate::page::Page;

/// The containers found by the first candidate selector that matched anything.
pub struct Resolved<'p, P: Page + 'p> {
    pub selector: &'static str,
    pub containers: Vec<P::Node<'p>>,
}

/// Tries `candidates` in order and returns every match of the first non-empty one.
///
/// Later candidates are not queried once one has matched. A candidate whose query
/// fails counts as matching nothing. `None` means the whole cascade came up empty.
pub fn resolve<'p, P: Page>(page: &'p P, candidates: &[&'static str]) -> Option<Resolved<'p, P>> {
    for &selector in candidates {
        let containers = match page.select_all(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(target: "cascade", "selector {selector:?} failed: {e}");
                continue;
            }
        };
        if containers.is_empty() {
            tracing::debug!(target: "cascade", "selector {selector:?}: nothing");
            continue;
        }
        tracing::info!(target: "cascade", "selector \x1b[1;36m{selector:?}\x1b[0m matched {} tiles", containers.len());
        return Some(Resolved {
            selector,
            containers,
        });
    }
    None
}
