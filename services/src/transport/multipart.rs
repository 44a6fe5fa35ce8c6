use super::TransportError;
use reqwest::multipart::{Form, Part};

/// Content of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    Text(String),
    File {
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub content: PartContent,
}

/// Description of a `multipart/form-data` body.
///
/// Fields are kept in insertion order. Encoding (boundary, part headers,
/// escaping of names and file names) is left to the transport, see
/// [`MultipartForm::into_reqwest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            content: PartContent::Text(value.into()),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            content: PartContent::File {
                file_name: file_name.into(),
                mime_type: mime_type.into(),
                bytes,
            },
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// First part named `name`.
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Value of the first text part named `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        match &self.part(name)?.content {
            PartContent::Text(value) => Some(value),
            PartContent::File { .. } => None,
        }
    }

    /// Builds the reqwest form. Names and file names are percent-encoded by
    /// reqwest, so quotes and line breaks cannot end up in a part header.
    pub fn into_reqwest(self) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part.content {
                PartContent::Text(value) => form.text(part.name, value),
                PartContent::File {
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let file_part = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&mime_type)
                        .map_err(|e| TransportError::Encoding {
                            reason: format!("invalid MIME type '{mime_type}': {e}"),
                        })?;
                    form.part(part.name, file_part)
                }
            };
        }
        Ok(form)
    }
}
