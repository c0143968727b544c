//! Integration tests for the WebSocket transport.
//!
//! These spin up a real WebSocket server and client to verify that text
//! frames actually flow over the network in both directions, and that a
//! clean close is reported as `None` rather than an error.

#[cfg(feature = "websocket")]
mod websocket {
    use buzzboard_transport::{Connection, Transport, WebSocketTransport};

    /// Helper: connects a tokio-tungstenite client to the given address.
    async fn connect_client(
        addr: &str,
    ) -> tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    > {
        let url = format!("ws://{addr}");
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("client should connect");
        ws
    }

    #[tokio::test]
    async fn test_websocket_accept_and_send_receive() {
        // Port 0 lets the OS pick a free port; local_addr tells us which.
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().unwrap().to_string();

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.expect("task should complete");

        assert!(server_conn.id().0 > 0);

        // --- Server sends, client receives ---
        server_conn
            .send(r#"{"event":"buzzer:open"}"#)
            .await
            .expect("send should succeed");

        use futures_util::StreamExt;
        let msg = client_ws.next().await.unwrap().unwrap();
        assert_eq!(
            msg.into_text().unwrap().as_str(),
            r#"{"event":"buzzer:open"}"#
        );

        // --- Client sends, server receives ---
        use futures_util::SinkExt;
        use tokio_tungstenite::tungstenite::Message;
        client_ws
            .send(Message::text(r#"{"event":"buzzer:press"}"#))
            .await
            .unwrap();

        let received = server_conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have a frame");
        assert_eq!(received, r#"{"event":"buzzer:press"}"#);

        server_conn.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_client_close() {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().unwrap().to_string();

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        use futures_util::SinkExt;
        use tokio_tungstenite::tungstenite::Message;
        client_ws.send(Message::Close(None)).await.unwrap();

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_websocket_connection_ids_are_unique() {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().unwrap().to_string();

        let server_handle = tokio::spawn(async move {
            let a = transport.accept().await.expect("accept first");
            let b = transport.accept().await.expect("accept second");
            (a, b)
        });

        let _c1 = connect_client(&addr).await;
        let _c2 = connect_client(&addr).await;
        let (a, b) = server_handle.await.unwrap();

        assert_ne!(a.id(), b.id());
    }
}
