fn main() {
    println!("Run `cargo test -p send-flow` to execute the send pipeline tests.");
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::Read;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use image::RgbaImage;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use iconreq_request::{
        AppRecord, IconRenderer, RequestConfig, SendError, SendOrchestrator, ShareRequest,
        ShareTarget,
    };

    struct SolidRenderer;

    impl IconRenderer for SolidRenderer {
        fn render(&self, _record: &AppRecord) -> Option<RgbaImage> {
            Some(RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255])))
        }
    }

    #[derive(Default)]
    struct RecordingShare {
        calls: Mutex<Vec<ShareRequest>>,
    }

    impl RecordingShare {
        fn calls(&self) -> Vec<ShareRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ShareTarget for RecordingShare {
        fn present(&self, request: ShareRequest) -> Result<(), String> {
            self.calls.lock().unwrap().push(request);
            Ok(())
        }
    }

    fn selection() -> Vec<AppRecord> {
        vec![
            AppRecord::new("Camera", "com.cam", "com.cam/.Main"),
            AppRecord::new("YouTube Music", "com.yt.music", "com.yt.music/.Player"),
        ]
    }

    /// Starts a one-shot mock request-manager answering with `body`; the
    /// handle resolves to the captured request bytes.
    async fn mock_backend(body: &str) -> (String, tokio::task::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let mut captured = Vec::new();
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                loop {
                    let read = tokio::time::timeout(
                        std::time::Duration::from_millis(250),
                        stream.read(&mut buf),
                    )
                    .await;
                    match read {
                        Ok(Ok(n)) if n > 0 => {
                            captured.extend_from_slice(&buf[..n]);
                            if captured.ends_with(b"--\r\n") {
                                break;
                            }
                        }
                        _ => break,
                    }
                }
                let resp = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
            captured
        });

        (url, handle)
    }

    fn share_orchestrator(
        staging: &Path,
    ) -> (SendOrchestrator, Arc<RecordingShare>) {
        let mut config = RequestConfig::new(staging);
        config.email_recipient = Some("icons@example.com".into());
        config.include_device_info = false;

        let share = Arc::new(RecordingShare::default());
        let orch =
            SendOrchestrator::new(config, Arc::new(SolidRenderer), share.clone()).unwrap();
        (orch, share)
    }

    fn remote_orchestrator(
        staging: &Path,
        host: &str,
    ) -> (SendOrchestrator, Arc<RecordingShare>) {
        let mut config = RequestConfig::new(staging);
        config.api_key = Some("integration-key".into());
        config.api_host = Some(host.to_string());
        // A recipient is also set to prove the API key wins the routing.
        config.email_recipient = Some("icons@example.com".into());

        let share = Arc::new(RecordingShare::default());
        let orch =
            SendOrchestrator::new(config, Arc::new(SolidRenderer), share.clone()).unwrap();
        (orch, share)
    }

    fn archive_in(dir: &Path) -> PathBuf {
        let mut archives: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|e| e == "zip"))
            .collect();
        assert_eq!(archives.len(), 1, "expected exactly one archive in {dir:?}");
        archives.pop().unwrap()
    }

    fn zip_entry(archive: &Path, name: &str) -> String {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        let mut entry = zip.by_name(name).unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        text
    }

    fn zip_names(archive: &Path) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        let mut names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn share_flow_archives_everything_and_presents_chooser() {
        let tmp = tempfile::tempdir().unwrap();
        let (orch, share) = share_orchestrator(tmp.path());

        orch.send(&selection()).await.unwrap();

        let archive = archive_in(tmp.path());
        assert_eq!(
            zip_names(&archive),
            vec![
                "appfilter.json",
                "appfilter.xml",
                "com.cam.png",
                "com.yt.music.png"
            ]
        );

        // Both manifest renderings agree on every drawable token.
        let legacy = zip_entry(&archive, "appfilter.xml");
        let json: serde_json::Value =
            serde_json::from_str(&zip_entry(&archive, "appfilter.json")).unwrap();
        let components = json["components"].as_array().unwrap();
        assert_eq!(components.len(), 2);
        for component in components {
            let drawable = component["drawable"].as_str().unwrap();
            assert!(legacy.contains(&format!("drawable=\"{drawable}\"")));
        }
        assert_eq!(components[0]["drawable"], "camera");
        assert_eq!(components[1]["drawable"], "youtube_music");
        assert!(legacy.contains("component=\"ComponentInfo{com.cam/.Main}\""));

        // Exactly one handoff, no staged leftovers besides the archive.
        let calls = share.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].archive_uri.ends_with(".zip"));
        let leftovers: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| !n.ends_with(".zip"))
            .collect();
        assert!(leftovers.is_empty(), "staging leftovers: {leftovers:?}");
    }

    #[tokio::test]
    async fn remote_flow_uploads_archive_and_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let (url, handle) = mock_backend(r#"{"status":"ok"}"#).await;
        let (orch, share) = remote_orchestrator(tmp.path(), &url);

        orch.send(&selection()).await.unwrap();

        // API key present means the chooser is never touched.
        assert!(share.calls().is_empty());

        let request = String::from_utf8_lossy(&handle.await.unwrap()).to_string();
        assert!(request.to_ascii_lowercase().contains("tokenid: integration-key"));
        assert!(request.contains("name=\"archive\""));
        assert!(request.contains("filename=\"icons.zip\""));
        assert!(request.contains("name=\"apps\""));
        assert!(request.contains("\"drawable\": \"youtube_music\""));

        // The archive holds only icons; manifests never hit the disk.
        let archive = archive_in(tmp.path());
        assert_eq!(zip_names(&archive), vec!["com.cam.png", "com.yt.music.png"]);
        assert!(!tmp.path().join("appfilter.xml").exists());
        assert!(!tmp.path().join("appfilter.json").exists());
    }

    #[tokio::test]
    async fn remote_flow_surfaces_backend_error_message() {
        let tmp = tempfile::tempdir().unwrap();
        let (url, handle) =
            mock_backend(r#"{"status":"error","error":"quota exceeded"}"#).await;
        let (orch, share) = remote_orchestrator(tmp.path(), &url);

        let err = orch.send(&selection()).await.unwrap_err();
        assert!(matches!(err, SendError::RemoteApi(msg) if msg == "quota exceeded"));
        assert!(share.calls().is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn share_flow_never_contacts_backend() {
        let tmp = tempfile::tempdir().unwrap();
        let (orch, share) = share_orchestrator(tmp.path());

        orch.send(&selection()).await.unwrap();
        assert_eq!(share.calls().len(), 1);
        // No API key configured: the orchestrator builds no HTTP client,
        // so there is no backend to contact by construction.
    }

    #[tokio::test]
    async fn sequential_sends_produce_distinct_archives() {
        let tmp = tempfile::tempdir().unwrap();
        let (orch, _share) = share_orchestrator(tmp.path());

        orch.send(&selection()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        orch.send(&selection()).await.unwrap();

        let archives: Vec<PathBuf> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|e| e == "zip"))
            .collect();
        assert_eq!(archives.len(), 2);
    }
}
