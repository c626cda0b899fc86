use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use log::info;

use crate::error::{ExportError, LogPlotError};

/// Image formats offered by the "Save All Graphs" dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Tiff,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Tiff];

    /// Dialog filter name.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Image",
            ExportFormat::Jpeg => "JPEG Image",
            ExportFormat::Tiff => "TIFF Image",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Png => &["png"],
            ExportFormat::Jpeg => &["jpg", "jpeg"],
            ExportFormat::Tiff => &["tif", "tiff"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| {
            f.extensions()
                .iter()
                .any(|e| e.eq_ignore_ascii_case(ext))
        })
    }

    /// Format implied by the path's extension. A missing extension means PNG;
    /// an unknown one is an error.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(ExportFormat::Png),
            Some(ext) => Self::from_extension(ext)
                .ok_or_else(|| ExportError::UnsupportedFormat(ext.to_string())),
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

/// Copy a captured viewport into an owned RGBA buffer.
pub fn color_image_to_rgba(image: &egui::ColorImage) -> RgbaImage {
    let [w, h] = image.size;
    let mut out = RgbaImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let p = image.pixels[y * w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    out
}

/// Encode `image` to `path`. JPEG has no alpha channel, so it is dropped.
pub fn save_rgba(image: &RgbaImage, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    match format {
        ExportFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.save_with_format(path, format.image_format())?;
        }
        _ => image.save_with_format(path, format.image_format())?,
    }
    info!("saved {}x{} capture to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Save to `path` in the format its extension implies.
pub fn save_capture(image: &egui::ColorImage, path: &Path) -> Result<ExportFormat, LogPlotError> {
    let format = ExportFormat::from_path(path)?;
    save_rgba(&color_image_to_rgba(image), path, format)?;
    Ok(format)
}

/// Default name proposed by the save dialog.
pub fn default_export_name() -> String {
    format!("graphs_{}.png", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

/// Ask for a destination with one filter per format, PNG first.
pub fn prompt_export_path() -> Option<PathBuf> {
    let mut dlg = rfd::FileDialog::new().set_file_name(default_export_name());
    for format in ExportFormat::ALL {
        dlg = dlg.add_filter(format.label(), format.extensions());
    }
    dlg.save_file()
}
