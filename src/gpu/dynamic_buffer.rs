//! Growable vertex buffers for per-frame geometry re-upload.
//!
//! The wave-displaced plane rewrites its vertices every frame, so its
//! buffer lives on the queue's upload path. Buffers grow with a 2x
//! strategy and never shrink (GPU buffers cannot be resized in place).

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A typed GPU buffer that grows automatically when written data exceeds
/// its capacity.
pub struct DynamicVertexBuffer<T> {
    buffer: wgpu::Buffer,
    capacity_bytes: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> DynamicVertexBuffer<T> {
    /// Buffer initialized from existing data.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: data_bytes,
            usage: usage | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            capacity_bytes: data_bytes.len().max(64),
            usage,
            label: label.to_string(),
            _marker: PhantomData,
        }
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (any bind groups
    /// holding it need recreation).
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) -> bool {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();

        let reallocated = if needed > self.capacity_bytes {
            // 2x growth, minimum 1KB step.
            let new_capacity = (needed * 2).max(self.capacity_bytes + 1024);

            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            self.capacity_bytes = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }

        reallocated
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
