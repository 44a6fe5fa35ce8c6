use claims::*;
use services::model::{ImageUpload, ProductCategory, ProductCreationRequest};
use services::products::ProductService;
use services::transport::ReqwestTransport;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const ACK: &str = r#"{"message":"Product added Successfully!","product_details":{"product_name":"Pen","product_type":"Product","price":10.0,"tax":5.0},"product_id":2657,"success":true}"#;

/// Accepts one connection, answers it with `ACK` and returns the raw request.
async fn serve_once() -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = socket.read(&mut buf).await.unwrap();
            if read == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..read]);
            if request_complete(&raw) {
                break;
            }
        }

        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{ACK}",
            ACK.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).into_owned()
    });

    (base, handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let head = text[..header_end].to_ascii_lowercase();
    let body_len = raw.len() - (header_end + 4);

    if let Some(line) = head.lines().find(|l| l.starts_with("content-length:")) {
        let expected: usize = line["content-length:".len()..].trim().parse().unwrap_or(0);
        return body_len >= expected;
    }
    if head.contains("transfer-encoding: chunked") {
        return text.ends_with("0\r\n\r\n");
    }
    true
}

fn upload(file_name: &str) -> ProductCreationRequest {
    ProductCreationRequest {
        name: "Pen".to_string(),
        category: ProductCategory::Product,
        price: 10.0,
        tax: 5.0,
        image: Some(ImageUpload {
            bytes: b"JPEGDATA".to_vec(),
            file_name: file_name.to_string(),
            mime_type: "image/jpeg".to_string(),
        }),
    }
}

fn transport() -> Arc<ReqwestTransport> {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Arc::new(ReqwestTransport::with_client(client))
}

#[tokio::test]
async fn test_multipart_upload_reaches_server() {
    let (base, server) = serve_once().await;
    let service = ProductService::new(base, transport());

    let created = assert_ok!(service.create_product(&upload("pen.jpg")).await);
    assert_eq!(created.product_id, 2657);

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /add HTTP/1.1\r\n"), "{raw}");
    assert!(raw.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
    assert!(raw.contains("name=\"product_name\"\r\n\r\nPen\r\n"));
    assert!(raw.contains("name=\"product_type\"\r\n\r\nProduct\r\n"));
    assert!(raw.contains("name=\"files[]\"; filename=\"pen.jpg\""));
    assert!(raw.contains("JPEGDATA"));
}

#[tokio::test]
async fn test_file_name_cannot_add_part_headers() {
    let (base, server) = serve_once().await;
    let service = ProductService::new(base, transport());

    assert_ok!(
        service
            .create_product(&upload("my\"pic\r\nX-Evil: 1.jpg"))
            .await
    );

    let raw = server.await.unwrap();
    assert!(!raw.contains("\r\nX-Evil"), "{raw}");
    assert!(!raw.contains("filename=\"my\"pic"), "{raw}");
    assert!(raw.contains("%0D%0AX-Evil"), "{raw}");
    assert!(raw.contains("JPEGDATA"));
}
