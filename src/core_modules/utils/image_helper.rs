pub mod image_helper {
    use image::ImageEncoder;

    use crate::core_modules::source_image::SourceImage;
    use crate::{Error, Result};

    /// Writes a `SourceImage` to disk as PNG.
    pub fn save(name: &str, image: &SourceImage) -> std::result::Result<(), image::error::ImageError> {
        let output = std::fs::File::create(name)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            image.as_bytes(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(())
    }

    /// Reads any image format the `image` crate decodes and converts it to
    /// an RGBA `SourceImage`.
    pub fn load(name: &str) -> Result<SourceImage> {
        let decoded = image::open(name)
            .map_err(|err| Error::MalformedProblem(format!("cannot open {name}: {err}")))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        SourceImage::from_raw(width, height, decoded.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::image_helper::*;
    use crate::core_modules::pixel::pixel::CHANNELS;
    use crate::core_modules::source_image::SourceImage;

    #[test]
    fn save_and_load_roundtrip() {
        let width = 6u32;
        let height = 4u32;
        let mut buffer = Vec::with_capacity((width * height) as usize * CHANNELS);
        for row in 0..height {
            for col in 0..width {
                buffer.extend_from_slice(&[row as u8 * 40, col as u8 * 40, 128, 255]);
            }
        }
        let image = SourceImage::from_raw(width, height, buffer).expect("buffer sized to match");

        let name = std::env::temp_dir().join("tile_shuffle_roundtrip.png");
        let name = name.to_str().expect("temp path is valid unicode");

        save(name, &image).expect("Error Saving File.");
        let reloaded = load(name).expect("Error Loading File.");

        assert_eq!(reloaded.width(), width);
        assert_eq!(reloaded.height(), height);
        assert_eq!(reloaded.as_bytes(), image.as_bytes());
    }

    #[test]
    fn load_reports_a_missing_file() {
        let result = load("/nonexistent/tile_shuffle_missing.png");
        assert!(result.is_err());
    }
}
