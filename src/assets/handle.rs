//! Background asset loading.
//!
//! Assets (textures, models) load on worker threads so a slow disk never
//! stalls the frame loop. Views hold an [`AssetHandle`] and poll it each
//! frame; a failed load logs a warning and leaves the view running with
//! its fallback material.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::LumenError;

/// Handle to an asset being loaded on a worker thread.
pub struct AssetHandle<T> {
    receiver: Receiver<Result<T, LumenError>>,
    resolved: bool,
}

impl<T: Send + 'static> AssetHandle<T> {
    /// Run `loader` on a named worker thread and return a pollable handle.
    ///
    /// Loading is best-effort: if the thread cannot be spawned the handle
    /// simply never resolves, and the failure is logged.
    pub fn spawn<F>(name: &str, loader: F) -> Self
    where
        F: FnOnce() -> Result<T, LumenError> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        let spawn_result = thread::Builder::new()
            .name(format!("lumen-asset-{name}"))
            .spawn(move || {
                let _ = sender.send(loader());
            });
        if let Err(e) = spawn_result {
            log::warn!("failed to spawn asset loader thread: {e}");
        }

        Self {
            receiver,
            resolved: false,
        }
    }

    /// Non-blocking poll. Returns the asset exactly once when the load
    /// finishes; `None` before that and forever after.
    pub fn poll(&mut self) -> Option<T> {
        if self.resolved {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(Ok(asset)) => {
                self.resolved = true;
                Some(asset)
            }
            Ok(Err(e)) => {
                self.resolved = true;
                log::warn!("asset load failed: {e}");
                None
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.resolved = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn resolves_exactly_once() {
        let mut handle = AssetHandle::spawn("test", || Ok(42_u32));

        let mut value = None;
        for _ in 0..100 {
            if let Some(v) = handle.poll() {
                value = Some(v);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(value, Some(42));
        assert_eq!(handle.poll(), None);
    }

    #[test]
    fn failed_load_resolves_to_none() {
        let mut handle: AssetHandle<u32> = AssetHandle::spawn("test-fail", || {
            Err(LumenError::Asset("missing".into()))
        });

        for _ in 0..100 {
            let _ = handle.poll();
            if handle.resolved {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        assert!(handle.resolved);
        assert_eq!(handle.poll(), None);
    }
}
