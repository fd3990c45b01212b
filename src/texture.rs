//! Texture module
//!
//! Decodes image files with the `image` crate and uploads them as sampled
//! 2D textures. A file that cannot be decoded is not fatal: it is logged and
//! replaced by a 1x1 blank texture so the slot stays bindable.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported channel count {0}")]
    UnsupportedChannels(u8),
}

/// Pixel layout chosen from the decoded channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexelFormat {
    R8,
    Rgb8,
    Rgba8,
}

impl TexelFormat {
    pub fn from_channels(channels: u8) -> Result<Self, TextureError> {
        match channels {
            1 => Ok(TexelFormat::R8),
            3 => Ok(TexelFormat::Rgb8),
            4 => Ok(TexelFormat::Rgba8),
            n => Err(TextureError::UnsupportedChannels(n)),
        }
    }

    /// GPU format the texels are uploaded as. There is no 3-channel 8-bit
    /// format, so RGB data is expanded to RGBA on upload.
    pub fn wgpu_format(&self) -> wgpu::TextureFormat {
        match self {
            TexelFormat::R8 => wgpu::TextureFormat::R8Unorm,
            TexelFormat::Rgb8 | TexelFormat::Rgba8 => wgpu::TextureFormat::Rgba8UnormSrgb,
        }
    }

    pub fn upload_bytes_per_pixel(&self) -> u32 {
        match self {
            TexelFormat::R8 => 1,
            TexelFormat::Rgb8 | TexelFormat::Rgba8 => 4,
        }
    }
}

/// Decoded image ready for upload
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: TexelFormat,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn decode(path: &Path) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_dynamic(img)
    }

    pub fn from_dynamic(img: image::DynamicImage) -> Result<Self, TextureError> {
        let (width, height) = (img.width(), img.height());
        let format = TexelFormat::from_channels(img.color().channel_count())?;
        let pixels = match format {
            TexelFormat::R8 => img.to_luma8().into_raw(),
            TexelFormat::Rgb8 => img.to_rgb8().into_raw(),
            TexelFormat::Rgba8 => img.to_rgba8().into_raw(),
        };
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// 1x1 opaque black texel
    pub fn blank() -> Self {
        Self {
            width: 1,
            height: 1,
            format: TexelFormat::Rgba8,
            pixels: vec![0, 0, 0, 255],
        }
    }

    /// Texel bytes in the layout expected by [`TexelFormat::wgpu_format`]
    pub fn upload_bytes(&self) -> Vec<u8> {
        match self.format {
            TexelFormat::Rgb8 => self
                .pixels
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
                .collect(),
            TexelFormat::R8 | TexelFormat::Rgba8 => self.pixels.clone(),
        }
    }
}

/// Sampled GPU texture; the view keeps the underlying texture alive
pub struct Texture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Load a texture from disk, substituting a blank texture on failure
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Self {
        let label = path.display().to_string();
        match DecodedImage::decode(path) {
            Ok(image) => {
                debug!(
                    "Loaded texture {} ({}x{}, {:?})",
                    label, image.width, image.height, image.format
                );
                Self::from_decoded(device, queue, &image, &label)
            }
            Err(e) => {
                warn!("Texture failed to load at path {}: {}", label, e);
                Self::from_decoded(device, queue, &DecodedImage::blank(), &label)
            }
        }
    }

    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: image.format.wgpu_format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.upload_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(image.width * image.format.upload_bytes_per_pixel()),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { view, sampler }
    }

    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("texture_bind_group_layout"),
        })
    }

    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
            label: Some("texture_bind_group"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

    #[test]
    fn test_channel_mapping() {
        assert_eq!(TexelFormat::from_channels(1).unwrap(), TexelFormat::R8);
        assert_eq!(TexelFormat::from_channels(3).unwrap(), TexelFormat::Rgb8);
        assert_eq!(TexelFormat::from_channels(4).unwrap(), TexelFormat::Rgba8);
        assert!(matches!(
            TexelFormat::from_channels(2),
            Err(TextureError::UnsupportedChannels(2))
        ));
        assert_eq!(TexelFormat::R8.wgpu_format(), wgpu::TextureFormat::R8Unorm);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = DecodedImage::decode(Path::new("does/not/exist.jpg")).unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(err.to_string().contains("exist.jpg"));
    }

    #[test]
    fn test_rgb_expanded_to_rgba() {
        let img = RgbImage::from_raw(2, 1, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let decoded = DecodedImage::from_dynamic(DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(decoded.format, TexelFormat::Rgb8);
        assert_eq!(decoded.upload_bytes(), vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn test_gray_and_rgba_passthrough() {
        let gray = GrayImage::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();
        let decoded = DecodedImage::from_dynamic(DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(decoded.format, TexelFormat::R8);
        assert_eq!(decoded.upload_bytes(), vec![1, 2, 3, 4]);

        let rgba = RgbaImage::from_raw(1, 1, vec![9, 8, 7, 6]).unwrap();
        let decoded = DecodedImage::from_dynamic(DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(decoded.format, TexelFormat::Rgba8);
        assert_eq!(decoded.upload_bytes(), vec![9, 8, 7, 6]);
    }

    #[test]
    fn test_gray_alpha_unsupported() {
        let img = DynamicImage::new_luma_a8(1, 1);
        assert!(matches!(
            DecodedImage::from_dynamic(img),
            Err(TextureError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn test_blank_is_single_texel() {
        let blank = DecodedImage::blank();
        assert_eq!((blank.width, blank.height), (1, 1));
        assert_eq!(blank.upload_bytes().len(), 4);
    }
}
