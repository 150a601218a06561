use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::prelude::*;

const DISPLAY_GAMMA: Float = 2.2;

#[derive(Clone, Debug)]
pub struct ImageData {
    // Linear radiance per pixel, row-major starting at the top-left
    pixel_colors: Vec<Vector3>,
    width: usize,
    height: usize,
    name: String,
}

impl ImageData {

    pub fn new(width: usize, height: usize, name: String, pixel_colors: Vec<Vector3>) -> Self {
        debug_assert_eq!(pixel_colors.len(), width * height);
        ImageData {
            pixel_colors,
            width,
            height,
            name,
        }
    }

    pub fn pixels(&self) -> &[Vector3] {
        &self.pixel_colors
    }

    /// Gamma-encode and quantize, returning [R1, G1, B1, R2, ...]
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixel_colors
            .iter()
            .flat_map(|v| [v.x, v.y, v.z])
            .map(|x| {
                // NaN ends up black
                let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
                (x.powf(1.0 / DISPLAY_GAMMA) * 255.0).round() as u8
            })
            .collect()
    }

    pub fn get_png_fullpath(&self, path: &Path) -> PathBuf {
        // If path is a folder create <imagename>.png under it,
        // otherwise use the provided path as is
        let extension = "png";
        let mut finalpath = if path.is_dir() {
            path.join(&self.name)
        } else {
            path.to_path_buf()
        };

        if finalpath.extension().and_then(|e| e.to_str()) != Some(extension) {
            finalpath.set_extension(extension);
            warn!(">> Extension changed to .{}, final path is {}", extension, finalpath.display());
        }
        finalpath
    }

    pub fn save_png(&self, path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
        // Path is either a folder name or full path including <imagename>.png
        let path = self.get_png_fullpath(path);

        let file = File::create(&path)?;
        let w = BufWriter::new(file);
        let mut encoder = png::Encoder::new(w, u32::try_from(self.width)?, u32::try_from(self.height)?);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        writer.write_image_data(&self.to_rgb())?;
        writer.finish()?;
        info!("Image saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgb_clamps_and_encodes() {
        let img = ImageData::new(
            2, 1, "t".to_string(),
            vec![Vector3::new(0.0, 1.0, 4.0), Vector3::new(-1.0, Float::NAN, 0.5)],
        );
        let rgb = img.to_rgb();
        assert_eq!(rgb.len(), 6);
        assert_eq!(&rgb[..3], &[0, 255, 255]);
        assert_eq!(rgb[3], 0);
        assert_eq!(rgb[4], 0);
        // 0.5^(1/2.2) * 255 = 186.1
        assert_eq!(rgb[5], 186);
    }

    #[test]
    fn test_png_path() {
        let img = ImageData::new(1, 1, "render.png".to_string(), vec![Vector3::ZERO]);
        let dir = std::env::temp_dir();
        assert_eq!(img.get_png_fullpath(&dir), dir.join("render.png"));
        assert_eq!(
            img.get_png_fullpath(Path::new("no_such_dir/out.jpg")),
            PathBuf::from("no_such_dir/out.png")
        );
    }

    #[test]
    fn test_save_png() {
        let name = format!("plane_tracer_test_{}.png", std::process::id());
        let img = ImageData::new(2, 2, name, vec![Vector3::splat(0.5); 4]);
        let path = img.save_png(&std::env::temp_dir()).unwrap();
        assert!(path.exists());
        std::fs::remove_file(path).unwrap();
    }
}
