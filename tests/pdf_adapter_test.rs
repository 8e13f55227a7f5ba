use pdfchat::application::ports::{FileLoader, FileLoaderError};
use pdfchat::infrastructure::text_processing::PdfAdapter;

#[tokio::test]
async fn given_two_page_pdf_when_extracting_then_pages_keep_source_order() {
    let adapter = PdfAdapter::new();
    let pdf_bytes = include_bytes!("fixtures/two_pages.pdf");

    let text = adapter.extract_text(pdf_bytes).await.unwrap();

    assert_eq!(text.page_count(), 2);
    assert!(text.pages()[0].contains("Alpha"));
    assert!(text.pages()[1].contains("Omega"));

    let concatenated = text.concatenated();
    let alpha = concatenated.find("Alpha").unwrap();
    let omega = concatenated.find("Omega").unwrap();
    assert!(alpha < omega);
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_pdf_then_returns_error() {
    let adapter = PdfAdapter::new();

    let result = adapter.extract_text(b"not a pdf at all").await;

    assert!(matches!(
        result,
        Err(FileLoaderError::ParseFailed(_))
            | Err(FileLoaderError::PageExtractionFailed { .. })
            | Err(FileLoaderError::ExtractionFailed(_))
    ));
}

#[tokio::test]
async fn given_empty_input_when_extracting_pdf_then_returns_error() {
    let adapter = PdfAdapter::new();

    let result = adapter.extract_text(&[]).await;

    assert!(result.is_err());
}
