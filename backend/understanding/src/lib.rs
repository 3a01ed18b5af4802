pub mod doc_parse;
pub mod ocr;

pub use doc_parse::{PageRasterizer, PdftoppmRasterizer};
pub use ocr::{tesseract_language, TesseractRecognizer, TextRecognizer};
