//! Image decoding, preparation and encoding around the pixel buffer core

use crate::io::configuration::{JPEG_QUALITY, TILE_LOAD_REPORT_INTERVAL};
use crate::io::error::{MosaicError, Result, file_system_error};
use crate::spatial::PixelBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Decode an image file and apply its EXIF orientation
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn open_oriented(path: &Path) -> Result<DynamicImage> {
    let load_error = |source| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| file_system_error(path, "open image", e))?;
    let mut decoder = reader.into_decoder().map_err(load_error)?;
    let orientation = decoder.orientation().map_err(load_error)?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(load_error)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Crop the largest centered square from an image
pub fn crop_square(img: &DynamicImage) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let side = width.min(height);
    img.crop_imm((width - side) / 2, (height - side) / 2, side, side)
}

/// Crop an image around its center so both dimensions are multiples of `tile_size`
pub fn center_crop_to_multiple(img: &DynamicImage, tile_size: u32) -> DynamicImage {
    if tile_size == 0 {
        return img.clone();
    }
    let (width, height) = (img.width(), img.height());
    let (x_excess, y_excess) = (width % tile_size, height % tile_size);
    if x_excess == 0 && y_excess == 0 {
        return img.clone();
    }
    img.crop_imm(
        x_excess / 2,
        y_excess / 2,
        width - x_excess,
        height - y_excess,
    )
}

/// Load the target image, enlarge it and crop it to a whole number of tiles
///
/// # Errors
///
/// Returns an error if the image cannot be loaded, or `InvalidGeometry` if the
/// enlarged image is smaller than a single tile
pub fn load_target(path: &Path, enlargement: u32, tile_size: u32) -> Result<PixelBuffer> {
    let img = open_oriented(path)?;
    let width = img.width().saturating_mul(enlargement);
    let height = img.height().saturating_mul(enlargement);
    if tile_size == 0 || width < tile_size || height < tile_size {
        return Err(MosaicError::InvalidGeometry {
            width: width as usize,
            height: height as usize,
            tile_size: tile_size as usize,
        });
    }

    let enlarged = img.resize_exact(width, height, FilterType::Lanczos3);
    let cropped = center_crop_to_multiple(&enlarged, tile_size);
    info!(
        "Target {} enlarged to {width}x{height}, cropped to {}x{}",
        path.display(),
        cropped.width(),
        cropped.height()
    );
    rgb_to_buffer(&cropped.to_rgb8())
}

/// Load one tile: orient, convert to RGB, crop square and resize
///
/// # Errors
///
/// Returns an error if the file cannot be decoded
pub fn load_tile(path: &Path, tile_size: u32) -> Result<PixelBuffer> {
    let img = open_oriented(path)?;
    let square = crop_square(&DynamicImage::ImageRgb8(img.to_rgb8()));
    let resized = square.resize_exact(tile_size, tile_size, FilterType::Lanczos3);
    rgb_to_buffer(&resized.to_rgb8())
}

/// Recursively list every file under `dir` in sorted order
///
/// # Errors
///
/// Returns an error if a directory cannot be read
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries =
            std::fs::read_dir(&current).map_err(|e| file_system_error(&current, "read directory", e))?;
        for entry in entries {
            let path = entry
                .map_err(|e| file_system_error(&current, "read directory entry", e))?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Load every decodable image under `dir` as a tile
///
/// Files that cannot be decoded are skipped. `on_loaded` receives the running
/// count each time another `TILE_LOAD_REPORT_INTERVAL` tiles have loaded.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, or `EmptyTileSet` if no
/// file could be loaded
pub fn load_tiles(
    dir: &Path,
    tile_size: u32,
    mut on_loaded: impl FnMut(usize),
) -> Result<Vec<PixelBuffer>> {
    info!("Reading tiles from {} ...", dir.display());
    let files = collect_files(dir)?;
    let mut tiles = Vec::new();

    for path in &files {
        match load_tile(path, tile_size) {
            Ok(tile) => {
                tiles.push(tile);
                if tiles.len() % TILE_LOAD_REPORT_INTERVAL == 0 {
                    debug!("Loaded {} tiles", tiles.len());
                    on_loaded(tiles.len());
                }
            }
            Err(e) => debug!("Skipping {}: {e}", path.display()),
        }
    }

    if tiles.is_empty() {
        warn!("No readable images among {} files", files.len());
        return Err(MosaicError::EmptyTileSet);
    }
    info!("Loaded {} tiles total", tiles.len());
    Ok(tiles)
}

/// Copy an RGB image into a pixel buffer
///
/// # Errors
///
/// Returns an error if the image's raw data does not match its dimensions
pub fn rgb_to_buffer(img: &RgbImage) -> Result<PixelBuffer> {
    PixelBuffer::from_raw(
        img.width() as usize,
        img.height() as usize,
        img.as_raw().clone(),
    )
}

/// Convert a pixel buffer into an RGB image
///
/// # Errors
///
/// Returns an error if the buffer dimensions do not fit in `u32`
pub fn buffer_to_rgb(buffer: PixelBuffer) -> Result<RgbImage> {
    let (width, height) = (buffer.width(), buffer.height());
    let too_large = || MosaicError::Computation {
        operation: "image conversion",
        reason: format!("{width}x{height} exceeds image size limits"),
    };
    let to_u32 = |value: usize| {
        u32::try_from(value).map_err(|e| MosaicError::Computation {
            operation: "image conversion",
            reason: format!("{width}x{height}: {e}"),
        })
    };
    let (w, h) = (to_u32(width)?, to_u32(height)?);
    RgbImage::from_raw(w, h, buffer.into_raw()).ok_or_else(too_large)
}

/// Encode the mosaic to `path`
///
/// `.jpg` and `.jpeg` outputs use a fixed high quality; other extensions use
/// the format inferred by the image crate.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or encoding fails
pub fn save_mosaic(buffer: PixelBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    let img = buffer_to_rgb(buffer)?;
    let export_error = |source| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    if is_jpeg {
        let file = File::create(path).map_err(|e| file_system_error(path, "create file", e))?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
        img.write_with_encoder(encoder).map_err(export_error)?;
        writer
            .flush()
            .map_err(|e| file_system_error(path, "write file", e))?;
    } else {
        img.save(path).map_err(export_error)?;
    }

    Ok(())
}
