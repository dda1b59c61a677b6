//! Frame export: offscreen re-render and PNG snapshot.

use std::sync::mpsc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::gpu::texture::RenderTarget;

use super::LumenEngine;

/// `copy_texture_to_buffer` requires rows aligned to 256 bytes.
const ROW_ALIGN: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

impl LumenEngine {
    /// Re-render the active view offscreen and write it to a PNG in the
    /// temp directory. Returns the file path on success.
    ///
    /// Export is best-effort: any failure logs a warning and returns
    /// `None` without disturbing the frame loop.
    pub fn export_frame(&mut self) -> Option<String> {
        let width = self.context.config.width;
        let height = self.context.config.height;
        if width == 0 || height == 0 {
            return None;
        }

        let format = self.context.format();
        let target = RenderTarget::new(
            &self.context.device,
            width,
            height,
            format,
        );

        let unpadded_bytes_per_row = 4 * width;
        let padded_bytes_per_row =
            unpadded_bytes_per_row.div_ceil(ROW_ALIGN) * ROW_ALIGN;
        let staging = self.context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Export Staging"),
            size: u64::from(padded_bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self.context.create_encoder();
        self.encode_scene_pass(&mut encoder, &target.view, &self.depth.view);
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.context.submit(encoder);

        let slice = staging.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.context.device.poll(wgpu::PollType::Wait);
        match rx.recv() {
            Ok(Ok(())) => {}
            other => {
                log::warn!("export readback failed: {other:?}");
                return None;
            }
        }

        let mut pixels =
            Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
        {
            let data = slice.get_mapped_range();
            for row in data.chunks(padded_bytes_per_row as usize) {
                pixels.extend_from_slice(
                    &row[..unpadded_bytes_per_row as usize],
                );
            }
        }
        staging.unmap();

        if is_bgra(format) {
            for px in pixels.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
        }

        let image =
            image::RgbaImage::from_raw(width, height, pixels)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!("lumen-frame-{stamp}.png"));
        if let Err(e) = image.save(&path) {
            log::warn!("export write failed: {e}");
            return None;
        }

        Some(path.display().to_string())
    }
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_padding_rounds_up_to_alignment() {
        // 4 bytes/px * 317 px = 1268 bytes, next multiple of 256 is 1280.
        let unpadded: u32 = 4 * 317;
        let padded = unpadded.div_ceil(ROW_ALIGN) * ROW_ALIGN;
        assert_eq!(padded, 1280);
        assert_eq!(padded % ROW_ALIGN, 0);
    }

    #[test]
    fn surface_bgra_formats_need_swizzle() {
        assert!(is_bgra(wgpu::TextureFormat::Bgra8UnormSrgb));
        assert!(!is_bgra(wgpu::TextureFormat::Rgba8UnormSrgb));
    }
}
