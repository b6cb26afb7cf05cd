use crate::error::{AssetError, PDFError};
use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};

/// Pixel data as it will be embedded
#[derive(Debug, Clone)]
pub enum RasterData {
    /// An RGB JPEG that can be embedded byte for byte
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A decoded image asset. `width` and `height` are in pixels; the size it is drawn at
/// is decided by the template, not by the image.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub width: u32,
    pub height: u32,
    pub data: RasterData,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl ImageAsset {
    /// Decode an image from its file contents. The format is sniffed from the data.
    pub fn from_bytes(bytes: &[u8]) -> Result<ImageAsset, AssetError> {
        let format = image::guess_format(bytes)?;
        let image = image::load_from_memory_with_format(bytes, format)?;

        match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Ok(ImageAsset {
                width: image.width(),
                height: image.height(),
                data: RasterData::Jpeg(bytes.to_vec()),
            }),
            _ => Ok(ImageAsset::from_image(image)),
        }
    }

    pub fn from_image(image: DynamicImage) -> ImageAsset {
        ImageAsset {
            width: image.width(),
            height: image.height(),
            data: RasterData::Decoded(image),
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            RasterData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    /// Write the image as an XObject registered as `Image(image_index)`, with a soft
    /// mask when the image has an alpha channel
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}
