use std::sync::Arc;

use crate::models::PageId;

/// Receives redirect commands from the shell.
pub trait Router: Send + Sync {
    /// Navigate to `page`. Rendering of the current cycle is abandoned.
    fn redirect(&self, page: PageId);
}

impl<T: Router> Router for Arc<T> {
    fn redirect(&self, page: PageId) {
        (**self).redirect(page)
    }
}
