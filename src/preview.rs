use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use iced::widget::image;

use crate::selection::SelectedFile;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static LIVE: AtomicUsize = AtomicUsize::new(0);

/// Number of preview handles issued and not yet released, process-wide.
#[cfg(test)]
fn live_handles() -> usize {
    LIVE.load(Ordering::SeqCst)
}

/// A displayable reference to the selected file's bytes.
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    id: u64,
    image: image::Handle,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn image(&self) -> &image::Handle {
        &self.image
    }
}

impl PartialEq for PreviewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Owns the single preview slot of the workflow.
///
/// Issuing a new handle always releases the previous one first, so at most
/// one handle per manager is live at any time.
#[derive(Debug, Default)]
pub struct PreviewManager {
    current: Option<PreviewHandle>,
}

impl PreviewManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, file: &SelectedFile) -> PreviewHandle {
        self.release();

        let handle = PreviewHandle {
            id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
            image: image::Handle::from_bytes(file.bytes.clone()),
        };
        LIVE.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Preview {} issued for {}", handle.id, file.name);

        self.current = Some(handle.clone());
        handle
    }

    /// Releases the live handle, if any. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(handle) = self.current.take() {
            LIVE.fetch_sub(1, Ordering::SeqCst);
            tracing::debug!("Preview {} released", handle.id);
        }
    }

    /// Releases `handle` if it is the live one; stale or foreign handles are ignored.
    #[cfg(test)]
    fn release_handle(&mut self, handle: &PreviewHandle) {
        if self.is_live(handle) {
            self.release();
        }
    }

    #[cfg(test)]
    fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.current.as_ref() == Some(handle)
    }

    #[cfg(test)]
    fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    pub fn live_count(&self) -> usize {
        usize::from(self.current.is_some())
    }
}

impl Drop for PreviewManager {
    fn drop(&mut self) {
        self.release();
    }
}
