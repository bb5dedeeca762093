//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start a mock health backend on an ephemeral loopback port whose response
/// status code can be flipped at runtime. Returns the bound address and a
/// handle to the current code.
pub async fn start_mock_backend() -> (SocketAddr, Arc<AtomicU16>) {
    let status_code = Arc::new(AtomicU16::new(200));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let code_handle = status_code.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let code = code_handle.load(Ordering::SeqCst);
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let status_text = match code {
                            200 => "200 OK",
                            429 => "429 Too Many Requests",
                            472 => "472 DR Secondary",
                            473 => "473 Performance Standby",
                            501 => "501 Not Implemented",
                            503 => "503 Service Unavailable",
                            _ => "500 Internal Server Error",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status_text
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, status_code)
}

/// Pick a free loopback address for the gate by binding port 0 and
/// releasing it. The gate binds a fixed address, so the tests reserve one
/// this way instead of hard-coding ports that may be occupied.
pub async fn free_gate_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Wait until a TCP connect to `addr` succeeds.
pub async fn wait_until_open(addr: SocketAddr) {
    for _ in 0..100 {
        if TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("port {} never opened", addr);
}

/// Wait until a TCP connect to `addr` is refused.
pub async fn wait_until_closed(addr: SocketAddr) {
    for _ in 0..100 {
        if TcpStream::connect(addr).await.is_err() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("port {} never closed", addr);
}
