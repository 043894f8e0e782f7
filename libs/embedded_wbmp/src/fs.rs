use embedded_io::{ErrorType, Read};

/// Something WBMP files can be opened from by path.
pub trait Filesystem: ErrorType {
    type File: Read;

    fn open_file(&self, path: &str) -> Result<Self::File, Self::Error>;
}

#[cfg(feature = "std")]
pub use self::std_fs::{StdFile, StdFilesystem};

#[cfg(feature = "std")]
mod std_fs {
    use std::{io::Read as _, path::PathBuf};

    use embedded_io::ErrorType;

    /// Opens files from the host filesystem, optionally relative to a base directory.
    #[derive(Debug, Clone, Default)]
    pub struct StdFilesystem {
        base_path: Option<PathBuf>,
    }

    impl StdFilesystem {
        pub fn new() -> Self {
            StdFilesystem { base_path: None }
        }

        pub fn new_with_base_path(base_path: PathBuf) -> Self {
            info!("Using StdFilesystem with base path: {:?}", base_path);
            StdFilesystem {
                base_path: Some(base_path),
            }
        }
    }

    impl ErrorType for StdFilesystem {
        type Error = std::io::Error;
    }

    impl super::Filesystem for StdFilesystem {
        type File = StdFile;

        fn open_file(&self, path: &str) -> std::io::Result<StdFile> {
            let file = match &self.base_path {
                Some(base) => std::fs::File::open(base.join(path))?,
                None => std::fs::File::open(path)?,
            };
            Ok(StdFile {
                file: std::io::BufReader::new(file),
            })
        }
    }

    pub struct StdFile {
        file: std::io::BufReader<std::fs::File>,
    }

    impl ErrorType for StdFile {
        type Error = std::io::Error;
    }

    impl embedded_io::Read for StdFile {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.file.read(buf)
        }
    }
}
