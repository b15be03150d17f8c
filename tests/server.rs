mod common;

use common::{Fixture, TOKEN};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn roundtrip(addr: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn answers_connections_in_sequence_then_stops() {
    let fx = Fixture::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let server = docserve::run(listener, &fx.site, 4096, async {
        let _ = stopped.await;
    });

    let client = async {
        let redirect = roundtrip(addr, "GET / HTTP/1.1\r\n\r\n").await;

        let login = roundtrip(
            addr,
            "POST /login.html HTTP/1.1\r\nHost: x\r\n\r\nusername=admin&password=admin",
        )
        .await;

        let create = roundtrip(
            addr,
            &format!("POST /index/items/42/answer HTTP/1.1\r\nCookie: {TOKEN}\r\n\r\n"),
        )
        .await;

        let index = roundtrip(addr, &format!("GET /index.html HTTP/1.1\r\nCookie: {TOKEN}\r\n\r\n")).await;

        stop.send(()).unwrap();
        (redirect, login, create, index)
    };

    let ((), (redirect, login, create, index)) = tokio::join!(server, client);

    assert!(redirect.starts_with("HTTP/1.1 301 Moved Permanently\r\nDate: "));
    assert!(redirect.contains("\r\nLocation: /login.html\r\n\r\n"));

    assert!(login.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(login.contains(&format!("\r\nSet-Cookie: {TOKEN}; Expires=")));
    assert!(login.ends_with("\r\n\r\nAuthentication Success"));

    assert!(create.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(create.ends_with("GMT\r\n\r\n"));

    assert!(index.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(index.contains("<p>Item 42 = answer</p>"));
    assert!(fx.document().contains("<p>Item 42 = answer</p>"));
}

#[tokio::test]
async fn wrong_version_over_the_wire() {
    let fx = Fixture::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let server = docserve::run(listener, &fx.site, 1024, async {
        let _ = stopped.await;
    });
    let client = async {
        let res = roundtrip(addr, "GET /about.html HTTP/1.0\r\n\r\n").await;
        stop.send(()).unwrap();
        res
    };

    let ((), res) = tokio::join!(server, client);
    assert!(res.starts_with("HTTP/1.1 505 HTTP Version Not Supported\r\n"));
    assert!(res.ends_with(common::VERSION_PAGE));
}

#[test]
fn bind_rejects_bad_addresses() {
    assert!(docserve::Server::bind("localhost").is_err());
    assert!(docserve::Server::bind("127.0.0.1:0").is_ok());
}
