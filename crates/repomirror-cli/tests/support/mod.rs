// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

// Minimal single-threaded HTTP/1.1 server for the end-to-end CLI scenarios,
// same shape as repomirror-yum's test support but with an optional per-route
// response delay, used to hold a mirror's lock open long enough for the lock
// contention scenario to observe it.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<std::sync::atomic::AtomicBool>,
}

impl TestServer {
    pub fn start(routes: HashMap<String, Vec<u8>>, delays: HashMap<String, Duration>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        listener.set_nonblocking(true).unwrap();
        let shutdown = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let routes = Arc::new(routes);
        let delays = Arc::new(delays);

        let handle = std::thread::spawn(move || {
            while !shutdown_clone.load(std::sync::atomic::Ordering::Relaxed) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let routes = routes.clone();
                        let delays = delays.clone();
                        handle_conn(stream, &routes, &delays);
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        std::thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        TestServer {
            addr,
            handle: Some(handle),
            shutdown,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.store(true, std::sync::atomic::Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

fn handle_conn(mut stream: TcpStream, routes: &HashMap<String, Vec<u8>>, delays: &HashMap<String, Duration>) {
    stream.set_nonblocking(false).ok();
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    if let Some(delay) = delays.get(&path) {
        std::thread::sleep(*delay);
    }

    match routes.get(&path) {
        Some(body) => {
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let body = b"not found";
            let header = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
    }
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

/// Writes a minimal, valid Yum repodata tree at `arch_dir` referencing zero
/// packages, for tests that only need `clean`/`diff` to find something
/// parseable on disk without any network I/O.
pub fn write_empty_repodata(arch_dir: &std::path::Path) {
    std::fs::create_dir_all(arch_dir.join("repodata")).unwrap();
    let primary = br#"<?xml version="1.0"?>
<metadata xmlns="http://linux.duke.edu/metadata/common" packages="0"></metadata>"#;
    let primary_gz = gzip(primary);
    let repomd = format!(
        r#"<?xml version="1.0"?>
<repomd xmlns="http://linux.duke.edu/metadata/repo">
  <data type="primary">
    <checksum type="sha256">ignored</checksum>
    <location href="repodata/primary.xml.gz"/>
    <size>{}</size>
  </data>
</repomd>"#,
        primary_gz.len()
    );
    std::fs::write(arch_dir.join("repodata/repomd.xml"), repomd).unwrap();
    std::fs::write(arch_dir.join("repodata/primary.xml.gz"), primary_gz).unwrap();
}
