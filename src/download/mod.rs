use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Streams `url` into `dest`, invoking `on_progress(bytes_so_far, total)`
/// after every chunk. `total` is the advertised Content-Length when the
/// server sent one. On any failure the partial file is removed before the
/// error is returned.
pub async fn download(
    client: &Client,
    url: &str,
    dest: &Path,
    mut on_progress: impl FnMut(u64, Option<u64>),
) -> Result<u64> {
    let result = fetch(client, url, dest, &mut on_progress).await;
    if result.is_err() && dest.exists() {
        let _ = tokio::fs::remove_file(dest).await;
    }
    result
}

async fn fetch(
    client: &Client,
    url: &str,
    dest: &Path,
    on_progress: &mut dyn FnMut(u64, Option<u64>),
) -> Result<u64> {
    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to send download request")?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}", response.status());
    }

    let total = response.content_length();
    copy_stream(response.bytes_stream(), dest, total, on_progress).await
}

/// Chunk-copy loop behind `download`, generic over the byte stream so the
/// no-partial-file guarantee is testable without a network.
pub async fn copy_stream<S, B, E>(
    stream: S,
    dest: &Path,
    total: Option<u64>,
    on_progress: &mut dyn FnMut(u64, Option<u64>),
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let result = copy_chunks(stream, dest, total, on_progress).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(dest).await;
    }
    result
}

async fn copy_chunks<S, B, E>(
    mut stream: S,
    dest: &Path,
    total: Option<u64>,
    on_progress: &mut dyn FnMut(u64, Option<u64>),
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Download stream interrupted")?;
        file.write_all(chunk.as_ref())
            .await
            .context("Failed to write chunk")?;
        written += chunk.as_ref().len() as u64;
        on_progress(written, total);
    }

    file.flush().await.context("Failed to flush file")?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn chunks(
        items: Vec<std::result::Result<Vec<u8>, io::Error>>,
    ) -> impl Stream<Item = std::result::Result<Vec<u8>, io::Error>> + Unpin {
        futures_util::stream::iter(items)
    }

    #[tokio::test]
    async fn test_copy_stream_writes_all_chunks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("app.apk");

        let stream = chunks(vec![Ok(b"hello ".to_vec()), Ok(b"world".to_vec())]);
        let mut reports = Vec::new();
        let written = copy_stream(stream, &dest, Some(11), &mut |done, total| {
            reports.push((done, total));
        })
        .await
        .expect("copy");

        assert_eq!(written, 11);
        assert_eq!(std::fs::read(&dest).expect("read"), b"hello world");
        assert_eq!(reports, vec![(6, Some(11)), (11, Some(11))]);
    }

    #[tokio::test]
    async fn test_interrupted_stream_leaves_no_partial_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("app.apk");

        let stream = chunks(vec![
            Ok(b"partial".to_vec()),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset")),
        ]);
        let result = copy_stream(stream, &dest, None, &mut |_, _| {}).await;

        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_unknown_total_is_reported_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("app.apk");

        let stream = chunks(vec![Ok(b"x".to_vec())]);
        let mut seen_total = Some(0);
        copy_stream(stream, &dest, None, &mut |_, total| {
            seen_total = total;
        })
        .await
        .expect("copy");

        assert_eq!(seen_total, None);
    }
}
