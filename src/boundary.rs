use crate::core::scope::Scope;

/// Mount a decorative feature so its failure cannot reach the rest of the
/// page. On error the feature is logged and everything it acquired so far
/// is released; the page carries on without it.
pub fn contain(
    name: &'static str,
    mount: impl FnOnce(&mut Scope) -> anyhow::Result<()>,
) -> Option<Scope> {
    let mut scope = Scope::new(name);
    match mount(&mut scope) {
        Ok(()) => {
            log::info!("[{}] mounted ({} resources)", name, scope.len());
            Some(scope)
        }
        Err(e) => {
            log::warn!("[{}] disabled: {:#}", name, e);
            scope.dispose();
            None
        }
    }
}
