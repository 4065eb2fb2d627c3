//! XML property list patcher for iOS Info.plist files
//!
//! The plist is walked with quick-xml to find the `<string>` values that follow the
//! `CFBundleShortVersionString` and `CFBundleVersion` keys of the top-level `<dict>`.
//! Only those value spans are replaced; declaration, DOCTYPE, comments, key order and
//! whitespace stay byte-identical.

use super::{record_change, splice, Edit, FilePatcher, Patched};
use crate::domain::{IosVersionDescriptor, TargetKind};
use crate::error::PatchError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

pub(crate) const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
pub(crate) const BUNDLE_VERSION_KEY: &str = "CFBundleVersion";

const BOM: &str = "\u{feff}";

/// Patcher for XML plist files
pub struct PlistPatcher {
    marketing_version: String,
    build_version: String,
}

/// Value element of a target key whose text is being read
struct OpenValue<'p> {
    key: &'static str,
    value: &'p str,
    start: usize,
}

impl PlistPatcher {
    /// Create a patcher writing the given descriptor
    pub fn new(descriptor: &IosVersionDescriptor) -> Self {
        Self {
            marketing_version: descriptor.marketing_version.clone(),
            build_version: descriptor.build_version.clone(),
        }
    }

    fn target_key(&self, key: &str) -> Option<(&'static str, &str)> {
        match key {
            SHORT_VERSION_KEY => Some((SHORT_VERSION_KEY, self.marketing_version.as_str())),
            BUNDLE_VERSION_KEY => Some((BUNDLE_VERSION_KEY, self.build_version.as_str())),
            _ => None,
        }
    }
}

/// Returns true when the open elements are exactly `<plist><dict>`
fn in_top_dict(stack: &[Vec<u8>]) -> bool {
    stack.len() == 2 && stack[0] == b"plist" && stack[1] == b"dict"
}

impl FilePatcher for PlistPatcher {
    fn patch_content(&self, path: &Path, content: &str) -> Result<Patched, PatchError> {
        // quick-xml skips a leading BOM, so offsets are taken on the text after it
        let (bom, content) = match content.strip_prefix(BOM) {
            Some(rest) => (BOM, rest),
            None => ("", content),
        };

        if content.starts_with("bplist") {
            return Err(PatchError::malformed_plist(
                path,
                "binary property lists are not supported",
            ));
        }

        let malformed = |message: String| PatchError::malformed_plist(path, message);
        let unexpected = |key: &str, element: &[u8]| PatchError::UnexpectedValue {
            path: path.to_path_buf(),
            field: key.to_string(),
            message: format!(
                "expected a <string> value, found <{}>",
                String::from_utf8_lossy(element)
            ),
        };

        let mut reader = Reader::from_str(content);
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut seen_root = false;
        let mut seen_top_dict = false;
        let mut key_text: Option<String> = None;
        let mut pending_key: Option<String> = None;
        let mut open_value: Option<OpenValue> = None;
        let mut edits = Vec::new();
        let mut changes = Vec::new();

        loop {
            let before = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|e| {
                malformed(format!(
                    "XML error at byte {}: {}",
                    reader.error_position(),
                    e
                ))
            })?;
            let after = reader.buffer_position() as usize;

            match event {
                Event::Start(e) => {
                    let name = e.local_name().as_ref().to_vec();
                    if stack.is_empty() {
                        if seen_root || name != b"plist" {
                            return Err(malformed(format!(
                                "expected a single <plist> root element, found <{}>",
                                String::from_utf8_lossy(&name)
                            )));
                        }
                        seen_root = true;
                    } else if stack.len() == 1 && name == b"dict" {
                        seen_top_dict = true;
                    } else if in_top_dict(&stack) {
                        if name == b"key" {
                            key_text = Some(String::new());
                        } else if let Some(key) = pending_key.take() {
                            if let Some((field, value)) = self.target_key(&key) {
                                if name != b"string" {
                                    return Err(unexpected(field, &name));
                                }
                                open_value = Some(OpenValue {
                                    key: field,
                                    value,
                                    start: after,
                                });
                            }
                        }
                    }
                    stack.push(name);
                }
                Event::Empty(e) => {
                    let name = e.local_name().as_ref().to_vec();
                    if stack.is_empty() {
                        return Err(malformed("plist root element is empty".to_string()));
                    }
                    if in_top_dict(&stack) {
                        if let Some(key) = pending_key.take() {
                            if let Some((field, value)) = self.target_key(&key) {
                                if name != b"string" {
                                    return Err(unexpected(field, &name));
                                }
                                record_change(&mut changes, field, "", value);
                                edits.push(Edit::new(
                                    before..after,
                                    format!("<string>{}</string>", value),
                                ));
                            }
                        }
                    }
                }
                Event::Text(e) => {
                    if let Some(text) = key_text.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(_) => {
                    let Some(name) = stack.pop() else {
                        return Err(malformed("unbalanced closing tag".to_string()));
                    };
                    if in_top_dict(&stack) {
                        if name == b"key" {
                            pending_key = key_text.take().map(|k| k.trim().to_string());
                        } else if let Some(open) = open_value.take() {
                            let old_value = &content[open.start..before];
                            record_change(&mut changes, open.key, old_value, open.value);
                            edits.push(Edit::new(open.start..before, open.value));
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(malformed(format!(
                "unexpected end of file inside <{}>",
                String::from_utf8_lossy(stack.last().map(Vec::as_slice).unwrap_or_default())
            )));
        }
        if !seen_root {
            return Err(malformed("missing <plist> root element".to_string()));
        }
        if !seen_top_dict {
            return Err(malformed("<plist> has no top-level <dict>".to_string()));
        }

        for key in [SHORT_VERSION_KEY, BUNDLE_VERSION_KEY] {
            if !changes.iter().any(|c| c.field == key) {
                return Err(PatchError::field_not_found(path, key));
            }
        }

        Ok(Patched {
            content: format!("{}{}", bom, splice(content, edits)),
            changes,
        })
    }

    fn kind(&self) -> TargetKind {
        TargetKind::Plist
    }

    fn invalid_encoding(&self, path: &Path) -> PatchError {
        PatchError::malformed_plist(path, "file is not a UTF-8 XML property list")
    }
}
