//! Well-known metadata keys.
//!
//! These are ordinary keys; nothing in the metadata stack treats them
//! specially. The read and write modules produce and consume them.

/// Absolute path of the file a document was read from.
pub const SOURCE_FILE_PATH: &str = "SourceFilePath";

/// Absolute input path the source file was found under.
pub const SOURCE_FILE_ROOT: &str = "SourceFileRoot";

/// File name of the source, with extension.
pub const SOURCE_FILE_NAME: &str = "SourceFileName";

/// File name of the source, without extension.
pub const SOURCE_FILE_BASE: &str = "SourceFileBase";

/// Extension of the source, without the dot.
pub const SOURCE_FILE_EXT: &str = "SourceFileExt";

/// Absolute directory containing the source.
pub const SOURCE_FILE_DIR: &str = "SourceFileDir";

/// Path of the source relative to its input path.
pub const RELATIVE_FILE_PATH: &str = "RelativeFilePath";

/// Directory of [`RELATIVE_FILE_PATH`].
pub const RELATIVE_FILE_DIR: &str = "RelativeFileDir";

/// Explicit output path, relative to the output directory.
pub const WRITE_PATH: &str = "WritePath";

/// Replacement extension for the output file.
pub const WRITE_EXTENSION: &str = "WriteExtension";

/// Replacement file name for the output file.
pub const WRITE_FILE_NAME: &str = "WriteFileName";

/// Absolute path a document was written to.
pub const DESTINATION_FILE_PATH: &str = "DestinationFilePath";

/// File name a document was written to.
pub const DESTINATION_FILE_NAME: &str = "DestinationFileName";

/// Absolute directory a document was written to.
pub const DESTINATION_FILE_DIR: &str = "DestinationFileDir";
