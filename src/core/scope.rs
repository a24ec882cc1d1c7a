/// Resources a mounted feature acquired, released together on unmount.
///
/// Releases run in reverse acquisition order. Dropping the scope disposes
/// it, so an early return or a failed mount releases whatever was acquired
/// up to that point.
pub struct Scope {
    name: &'static str,
    disposers: Vec<Box<dyn FnOnce()>>,
}

impl Scope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            disposers: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a release action.
    pub fn defer(&mut self, release: impl FnOnce() + 'static) {
        self.disposers.push(Box::new(release));
    }

    /// Keep `guard` alive until the scope is disposed; its `Drop` is the
    /// release action.
    pub fn hold<T: 'static>(&mut self, guard: T) {
        self.defer(move || drop(guard));
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Release everything. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposers.is_empty() {
            return;
        }
        log::debug!("[scope] {} releasing {} resources", self.name, self.disposers.len());
        while let Some(release) = self.disposers.pop() {
            release();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.dispose();
    }
}
