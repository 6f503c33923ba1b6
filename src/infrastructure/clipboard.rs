use arboard::Clipboard;

pub struct ClipboardRepository;

impl ClipboardRepository {
    /// Puts `text` on the system clipboard and echoes it back on success.
    pub fn copy_text(text: &str) -> Result<String, String> {
        let mut clipboard = Clipboard::new().map_err(|e| e.to_string())?;
        clipboard.set_text(text).map_err(|e| e.to_string())?;
        Ok(text.to_string())
    }
}
