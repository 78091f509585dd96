use crate::split::SplitRequest;
use crate::worker;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub async fn run(request: SplitRequest, verbose: bool) -> Result<PathBuf> {
    let output_path = request.output_path();
    let context = format!(
        "Failed to split pages {} to {} of {}",
        request.start_page,
        request.end_page,
        request.input.display()
    );
    let (start_page, end_page) = (request.start_page, request.end_page);

    let outcome = worker::run(request, |progress| {
        if verbose {
            println!("Adding page {} to {}", progress.page, output_path.display());
        }
    })
    .await
    .context(context)?;

    if verbose {
        println!(
            "Successfully split pages {} to {} into {}",
            start_page,
            end_page,
            outcome.output_path.display()
        );
    }

    Ok(outcome.output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitError;
    use crate::pdf::fixtures::write_sample_pdf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = write_sample_pdf(dir.path(), "in.pdf", 10);
        let output = dir.path().join("out.pdf");

        let written = run(SplitRequest::new(&input, 3, 5).with_output(&output), true)
            .await
            .unwrap();
        assert_eq!(written, output);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_run_error_keeps_cause() {
        let dir = TempDir::new().unwrap();
        let input = write_sample_pdf(dir.path(), "in.pdf", 10);

        let err = run(SplitRequest::new(&input, 7, 3), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to split pages 7 to 3"));
        let cause = err.downcast_ref::<SplitError>().unwrap();
        assert_eq!(cause.kind(), "RangeError");
    }
}
