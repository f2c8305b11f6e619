//! Graphics device seam for texture uploads.
//!
//! The loader hands a device the complete surviving mip chain in one
//! call. A device that must run uploads on a designated thread marshals
//! that call across as one blocking unit, so concurrent loads can never
//! interleave their levels.

use std::sync::{Arc, Mutex, MutexGuard, mpsc};
use std::thread;

use thiserror::Error;

use crucible_common::SurfaceFormat;

use crate::capabilities::GraphicsCapabilities;

/// Handle to a created device texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// A decoded texture ready for upload: the format after capability
/// policy and every level that survived it, base level first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureUpload {
    pub format: SurfaceFormat,
    /// Padded storage width of the base level.
    pub width: u32,
    pub height: u32,
    /// Width of the source image before the compiler padded it.
    pub original_width: u32,
    pub original_height: u32,
    pub levels: Vec<Vec<u8>>,
}

/// Errors from handing work to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The device's worker thread is gone.
    #[error("graphics device is no longer accepting work")]
    Disconnected,
}

/// A texture upload sink with a capability set.
pub trait GraphicsDevice {
    fn capabilities(&self) -> GraphicsCapabilities;

    /// Create a texture from a complete mip chain. One blocking call.
    fn create_texture(&self, upload: TextureUpload) -> Result<TextureHandle, DeviceError>;
}

impl<D: GraphicsDevice> GraphicsDevice for Arc<D> {
    fn capabilities(&self) -> GraphicsCapabilities {
        (**self).capabilities()
    }

    fn create_texture(&self, upload: TextureUpload) -> Result<TextureHandle, DeviceError> {
        (**self).create_texture(upload)
    }
}

/// In-memory device for tests and headless tools. Keeps every upload.
pub struct SoftwareDevice {
    capabilities: GraphicsCapabilities,
    textures: Mutex<Vec<TextureUpload>>,
}

impl SoftwareDevice {
    pub fn new(capabilities: GraphicsCapabilities) -> Self {
        Self {
            capabilities,
            textures: Mutex::new(Vec::new()),
        }
    }

    /// Copy of the upload behind a handle, if one was created.
    pub fn texture(&self, handle: TextureHandle) -> Option<TextureUpload> {
        self.lock().get(handle.0 as usize).cloned()
    }

    pub fn texture_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TextureUpload>> {
        self.textures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl GraphicsDevice for SoftwareDevice {
    fn capabilities(&self) -> GraphicsCapabilities {
        self.capabilities
    }

    fn create_texture(&self, upload: TextureUpload) -> Result<TextureHandle, DeviceError> {
        let mut textures = self.lock();
        textures.push(upload);
        Ok(TextureHandle(textures.len() as u64 - 1))
    }
}

struct RenderJob {
    upload: TextureUpload,
    done: mpsc::Sender<Result<TextureHandle, DeviceError>>,
}

/// Marshals uploads onto a dedicated thread owning the wrapped device.
///
/// `create_texture` sends the whole chain across and blocks until the
/// worker finishes it. Dropping the device shuts the worker down once
/// queued work drains.
pub struct RenderThreadDevice {
    capabilities: GraphicsCapabilities,
    jobs: mpsc::Sender<RenderJob>,
    worker: Option<thread::JoinHandle<()>>,
}

impl RenderThreadDevice {
    /// Move `device` onto a new worker thread.
    pub fn spawn<D>(device: D) -> Self
    where
        D: GraphicsDevice + Send + 'static,
    {
        let capabilities = device.capabilities();
        let (jobs, queue) = mpsc::channel::<RenderJob>();
        let worker = thread::spawn(move || {
            while let Ok(job) = queue.recv() {
                let _ = job.done.send(device.create_texture(job.upload));
            }
        });
        Self {
            capabilities,
            jobs,
            worker: Some(worker),
        }
    }
}

impl GraphicsDevice for RenderThreadDevice {
    fn capabilities(&self) -> GraphicsCapabilities {
        self.capabilities
    }

    fn create_texture(&self, upload: TextureUpload) -> Result<TextureHandle, DeviceError> {
        let (done, finished) = mpsc::channel();
        self.jobs
            .send(RenderJob { upload, done })
            .map_err(|_| DeviceError::Disconnected)?;
        finished.recv().map_err(|_| DeviceError::Disconnected)?
    }
}

impl Drop for RenderThreadDevice {
    fn drop(&mut self) {
        // Replacing the sender disconnects the queue; the worker finishes
        // what was already sent and exits.
        self.jobs = mpsc::channel().0;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(width: u32) -> TextureUpload {
        TextureUpload {
            format: SurfaceFormat::Color,
            width,
            height: 1,
            original_width: width,
            original_height: 1,
            levels: vec![vec![0u8; width as usize * 4]],
        }
    }

    #[test]
    fn test_software_device_stores_uploads_in_order() {
        let device = SoftwareDevice::new(GraphicsCapabilities::FULL);
        let first = device.create_texture(upload(2)).unwrap();
        let second = device.create_texture(upload(4)).unwrap();

        assert_eq!(first, TextureHandle(0));
        assert_eq!(second, TextureHandle(1));
        assert_eq!(device.texture_count(), 2);
        assert_eq!(device.texture(first).unwrap().width, 2);
        assert_eq!(device.texture(second).unwrap().width, 4);
        assert_eq!(device.texture(TextureHandle(9)), None);
    }

    #[test]
    fn test_render_thread_device_forwards_whole_uploads() {
        let inner = Arc::new(SoftwareDevice::new(GraphicsCapabilities::FULL));
        let device = RenderThreadDevice::spawn(Arc::clone(&inner));
        assert_eq!(device.capabilities(), GraphicsCapabilities::FULL);

        let first = device.create_texture(upload(8)).unwrap();
        let second = device.create_texture(upload(16)).unwrap();
        assert_eq!(first, TextureHandle(0));
        assert_eq!(second, TextureHandle(1));

        drop(device);
        assert_eq!(inner.texture_count(), 2);
        assert_eq!(inner.texture(first).unwrap().width, 8);
    }

    #[test]
    fn test_render_thread_device_reports_dead_worker() {
        struct PanickingDevice;

        impl GraphicsDevice for PanickingDevice {
            fn capabilities(&self) -> GraphicsCapabilities {
                GraphicsCapabilities::FULL
            }

            fn create_texture(
                &self,
                _upload: TextureUpload,
            ) -> Result<TextureHandle, DeviceError> {
                panic!("upload rejected");
            }
        }

        let device = RenderThreadDevice::spawn(PanickingDevice);
        assert_eq!(
            device.create_texture(upload(1)),
            Err(DeviceError::Disconnected)
        );
    }
}
