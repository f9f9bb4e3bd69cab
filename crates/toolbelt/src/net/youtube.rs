use crate::http::HttpClient;
use crate::prelude::*;
use toolbelt_core::net::{thumbnails, Thumbnail, ThumbnailQuality};

/// Fetches the thumbnail at `quality`, stepping down to smaller sizes when
/// the video has no such thumbnail. Not every video has `maxresdefault`.
pub async fn download(
    client: &impl HttpClient,
    id: &str,
    quality: ThumbnailQuality,
) -> Result<(Thumbnail, Vec<u8>)> {
    let candidates = thumbnails(id)
        .into_iter()
        .skip_while(|t| t.quality != quality);

    let mut last_error = None;
    for thumb in candidates {
        match client.get_bytes(&thumb.url).await {
            Ok(bytes) => return Ok((thumb, bytes)),
            Err(e) => {
                log::debug!("{} failed: {e}", thumb.url);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| eyre!("No thumbnail sizes to try for {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::FakeClient;
    use toolbelt_core::net::thumbnail_url;

    const ID: &str = "dQw4w9WgXcQ";

    #[tokio::test]
    async fn test_download_requested_quality() {
        let client = FakeClient::new().with(&thumbnail_url(ID, ThumbnailQuality::High), b"jpeg".to_vec());
        let (thumb, bytes) = download(&client, ID, ThumbnailQuality::High).await.unwrap();
        assert_eq!(thumb.quality, ThumbnailQuality::High);
        assert_eq!(thumb.file_name, "youtube-thumbnail-dQw4w9WgXcQ-hqdefault.jpg");
        assert_eq!(bytes, b"jpeg");
    }

    #[tokio::test]
    async fn test_falls_back_to_smaller_size() {
        let client = FakeClient::new()
            .failing(&thumbnail_url(ID, ThumbnailQuality::MaxRes), "HTTP 404")
            .with(&thumbnail_url(ID, ThumbnailQuality::High), b"jpeg".to_vec());
        let (thumb, _) = download(&client, ID, ThumbnailQuality::MaxRes).await.unwrap();
        assert_eq!(thumb.quality, ThumbnailQuality::High);
        // maxres, then sd (no route), then hq
        assert_eq!(client.calls.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_all_sizes_missing() {
        let client = FakeClient::new();
        assert!(download(&client, ID, ThumbnailQuality::Medium).await.is_err());
        assert_eq!(client.calls.borrow().len(), 2);
    }
}
