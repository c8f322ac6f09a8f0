// Document intake: staging the upload on disk, pulling text out of the PDF,
// and splitting that text into overlapping chunks.

pub mod chunking;
pub mod extractor;
pub mod staging;
