// Export: ask the user where to save, then write the packed `.li` bytes.
//
// The dialog and the file system sit behind two small traits so the main
// loop uses the native ones and tests can count calls.

use crate::error::Error;
use crate::surface::PaintSurface;
use std::path::{Path, PathBuf};

/// File extension (and dialog filter name) of the export format.
pub const LI_EXTENSION: &str = "li";

/// Source of the destination path. `None` means the user cancelled.
pub trait SavePathPrompt {
    fn request_path(&mut self) -> Option<PathBuf>;
}

/// Sink for the encoded bytes.
pub trait FileWriter {
    fn write(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

/// Native "save as" dialog, restricted to `*.li`.
pub struct DialogPrompt {
    title: String,
}

impl DialogPrompt {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl Default for DialogPrompt {
    fn default() -> Self {
        Self::new("Export canvas")
    }
}

impl SavePathPrompt for DialogPrompt {
    fn request_path(&mut self) -> Option<PathBuf> {
        // Blocks the event loop until the dialog closes.
        rfd::FileDialog::new()
            .set_title(&self.title)
            .add_filter(LI_EXTENSION, &[LI_EXTENSION])
            .save_file()
    }
}

pub struct FsWriter;

impl FileWriter for FsWriter {
    fn write(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(path, bytes)
    }
}

/// Prompt for a path and write the canvas there.
///
/// Returns `Ok(None)` if the prompt was cancelled (nothing is written) and
/// `Ok(Some(path))` once the bytes are on disk.
pub fn export_canvas(
    surface: &PaintSurface,
    prompt: &mut impl SavePathPrompt,
    writer: &mut impl FileWriter,
) -> Result<Option<PathBuf>, Error> {
    let Some(path) = prompt.request_path() else {
        log::info!("export cancelled");
        return Ok(None);
    };

    let bytes = surface.encode_li();
    writer
        .write(&path, &bytes)
        .map_err(|source| Error::Write { path: path.clone(), source })?;

    log::info!(
        "exported {}x{} canvas ({} bytes) to {}",
        surface.width(),
        surface.height(),
        bytes.len(),
        path.display()
    );
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::surface::{LI_BLANK, LI_INK};
    use crate::types::{Point, ViewportRect};
    use std::io;

    struct FixedPrompt(Option<PathBuf>);

    impl SavePathPrompt for FixedPrompt {
        fn request_path(&mut self) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        writes: Vec<(PathBuf, Vec<u8>)>,
        fail: bool,
    }

    impl FileWriter for RecordingWriter {
        fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.writes.push((path.to_path_buf(), bytes.to_vec()));
            Ok(())
        }
    }

    fn small_surface() -> PaintSurface {
        let cfg = CanvasConfig { buffer_width: 40, buffer_height: 30, ..CanvasConfig::default() };
        PaintSurface::new(&cfg).unwrap()
    }

    #[test]
    fn cancelled_prompt_writes_nothing() {
        let surface = small_surface();
        let mut writer = RecordingWriter::default();
        let out = export_canvas(&surface, &mut FixedPrompt(None), &mut writer).unwrap();
        assert_eq!(out, None);
        assert!(writer.writes.is_empty());
    }

    #[test]
    fn chosen_path_gets_one_write_of_the_packed_buffer() {
        let mut surface = small_surface();
        surface.set_tool_width(9);
        let view = ViewportRect { x: 0.0, y: 0.0, width: 40.0, height: 30.0 };
        surface.begin_stroke();
        surface.continue_stroke(Point::new(5.0, 15.0), view);
        surface.continue_stroke(Point::new(35.0, 15.0), view);
        surface.end_stroke();

        let path = PathBuf::from("drawing.li");
        let mut writer = RecordingWriter::default();
        let out = export_canvas(&surface, &mut FixedPrompt(Some(path.clone())), &mut writer).unwrap();

        assert_eq!(out, Some(path.clone()));
        assert_eq!(writer.writes.len(), 1);
        let (written_to, bytes) = &writer.writes[0];
        assert_eq!(written_to, &path);
        assert_eq!(bytes.len(), 40 * 30);
        assert_eq!(bytes[15 * 40 + 20], LI_INK);
        assert_eq!(bytes[0], LI_BLANK);
        assert_eq!(bytes, &surface.encode_li());
    }

    #[test]
    fn write_failure_is_reported_with_the_path() {
        let surface = small_surface();
        let mut writer = RecordingWriter { fail: true, ..Default::default() };
        let err = export_canvas(&surface, &mut FixedPrompt(Some("locked.li".into())), &mut writer)
            .unwrap_err();
        match err {
            Error::Write { path, source } => {
                assert_eq!(path, PathBuf::from("locked.li"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fs_writer_puts_raw_bytes_on_disk() {
        let path = std::env::temp_dir().join(format!("li-sketch-{}.li", std::process::id()));
        let surface = small_surface();
        let out = export_canvas(&surface, &mut FixedPrompt(Some(path.clone())), &mut FsWriter).unwrap();
        assert_eq!(out.as_deref(), Some(path.as_path()));

        let on_disk = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(on_disk.len(), 40 * 30);
        assert!(on_disk.iter().all(|&b| b == LI_BLANK));
    }
}
