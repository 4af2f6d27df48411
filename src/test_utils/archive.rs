//! In-memory ZIP construction for tests.

use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

enum Entry {
    Dir(String),
    File {
        name: String,
        data: Vec<u8>,
        mode: Option<u32>,
    },
}

/// Builds a ZIP archive entry by entry.
///
/// Entry names are written verbatim, including unsafe ones like
/// `../evil.txt`, so extraction guards can be tested.
#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<Entry>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory entry. The name should end in `/`.
    #[must_use]
    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push(Entry::Dir(name.to_string()));
        self
    }

    #[must_use]
    pub fn file(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.entries.push(Entry::File {
            name: name.to_string(),
            data: data.as_ref().to_vec(),
            mode: None,
        });
        self
    }

    /// Add a file entry carrying Unix permission bits.
    #[must_use]
    pub fn executable(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.entries.push(Entry::File {
            name: name.to_string(),
            data: data.as_ref().to_vec(),
            mode: Some(0o755),
        });
        self
    }

    /// Finish the archive and return its bytes.
    ///
    /// # Panics
    ///
    /// Panics if the archive cannot be written; only used from tests.
    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        for entry in self.entries {
            match entry {
                Entry::Dir(name) => {
                    zip.add_directory(name, options).unwrap();
                }
                Entry::File {
                    name,
                    data,
                    mode,
                } => {
                    let options = match mode {
                        Some(mode) => options.unix_permissions(mode),
                        None => options,
                    };
                    zip.start_file(name, options).unwrap();
                    zip.write_all(&data).unwrap();
                }
            }
        }

        zip.finish().unwrap().into_inner()
    }
}
